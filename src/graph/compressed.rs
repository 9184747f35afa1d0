//! Mutable adjacency store with lazily derived CSR and varint views.
//!
//! [`CompressedGraph`] keeps one sorted, deduplicated successor list per node
//! as its single source of truth. Two read-only views are derived from it on
//! demand:
//!
//! * a dense [`FrozenCsr`] (offsets + flat neighbor array), and
//! * a [`VarintView`] of delta-coded runs, encoded from the CSR view.
//!
//! Both live in `OnceCell`s: the first reader after a mutation rebuilds the
//! view, concurrent first readers wait for that single rebuild and then share
//! it. Every mutator takes `&mut self` and drops both views, so any neighbor
//! slice handed out earlier is statically out of scope before the adjacency
//! changes. Writers and readers never overlap.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::NodeId;
use super::cache::InvalidateCache;
use super::frozen_csr::FrozenCsr;
use super::graph_trait::Graph;
use super::varint::{VarintNeighbors, VarintView};
use crate::debug_invariants::{DebugInvariants, violation};
use crate::graph_error::GraphError;

/// Upper bound on stored edges: keeps CSR offsets and varint offsets
/// (at most five bytes per edge) inside `u32`.
pub const EDGE_CAPACITY: usize = (u32::MAX / 5) as usize;

/// Byte sizes of the derived views.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFootprint {
    /// CSR neighbors + offsets.
    pub dense_bytes: usize,
    /// Varint buffer + varint offsets; zero until the varint view is built.
    pub varint_bytes: usize,
}

/// Directed graph over dense ids with lazily compressed read views.
#[derive(Clone, Debug, Default)]
pub struct CompressedGraph {
    adjacency: Vec<Vec<NodeId>>,
    in_degree: Vec<u32>,
    edge_count: usize,
    generation: u64,
    csr: OnceCell<FrozenCsr>,
    varint: OnceCell<VarintView>,
}

fn sort_and_dedup(run: &mut Vec<NodeId>) {
    run.sort_unstable();
    run.dedup();
}

impl CompressedGraph {
    /// Creates an empty graph with no nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `n` isolated nodes.
    pub fn with_nodes(n: usize) -> Self {
        let mut g = Self::default();
        g.reset(n);
        g
    }

    /// Builds a graph from per-node successor lists.
    ///
    /// # Example
    /// ```rust
    /// use csr_toposort::graph::{CompressedGraph, Graph};
    /// let g = CompressedGraph::from_adj(&[vec![2, 1, 2], vec![2], vec![]]).unwrap();
    /// assert_eq!(g.neighbor_span(0), &[1, 2]);
    /// assert_eq!(g.edge_count(), 3);
    /// ```
    pub fn from_adj<A: AsRef<[NodeId]>>(adj: &[A]) -> Result<Self, GraphError> {
        let mut g = Self::default();
        g.build_from_adj(adj)?;
        Ok(g)
    }

    /// Builds a graph with `n` nodes from an edge list.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, GraphError> {
        let mut g = Self::default();
        g.build_from_edges(n, edges)?;
        Ok(g)
    }

    /// Reinitializes to `n` isolated nodes and drops all derived state.
    pub fn reset(&mut self, n: usize) {
        self.adjacency = vec![Vec::new(); n];
        self.in_degree = vec![0; n];
        self.edge_count = 0;
        self.touch();
    }

    /// Replaces the graph with `adj`, sorting and deduplicating each run.
    ///
    /// Every neighbor id must be below `adj.len()`; on error the graph is
    /// left untouched.
    pub fn build_from_adj<A: AsRef<[NodeId]>>(&mut self, adj: &[A]) -> Result<(), GraphError> {
        let n = adj.len();
        let mut adjacency = Vec::with_capacity(n);
        for run in adj {
            let run = run.as_ref();
            if let Some(&bad) = run.iter().find(|&&v| v as usize >= n) {
                return Err(GraphError::out_of_range(bad, n));
            }
            let mut run = run.to_vec();
            sort_and_dedup(&mut run);
            adjacency.push(run);
        }
        self.commit(adjacency)
    }

    /// Replaces the graph with `n` nodes and the given edges.
    ///
    /// Both endpoints of every edge must be below `n`; on error the graph
    /// is left untouched. Duplicate edges collapse to one.
    pub fn build_from_edges(
        &mut self,
        n: usize,
        edges: &[(NodeId, NodeId)],
    ) -> Result<(), GraphError> {
        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in edges {
            for id in [u, v] {
                if id as usize >= n {
                    return Err(GraphError::out_of_range(id, n));
                }
            }
            adjacency[u as usize].push(v);
        }
        for run in &mut adjacency {
            sort_and_dedup(run);
        }
        self.commit(adjacency)
    }

    fn commit(&mut self, adjacency: Vec<Vec<NodeId>>) -> Result<(), GraphError> {
        let edge_count: usize = adjacency.iter().map(Vec::len).sum();
        if edge_count > EDGE_CAPACITY {
            return Err(GraphError::EdgeCapacityExceeded(edge_count));
        }
        let mut in_degree = vec![0u32; adjacency.len()];
        for &v in adjacency.iter().flatten() {
            in_degree[v as usize] += 1;
        }
        self.adjacency = adjacency;
        self.in_degree = in_degree;
        self.edge_count = edge_count;
        self.touch();
        log::debug!(
            "loaded graph: {} nodes, {} edges",
            self.adjacency.len(),
            edge_count
        );
        Ok(())
    }

    /// Inserts `u → v`. Returns `Ok(false)` when the edge already existed,
    /// in which case nothing changes.
    ///
    /// Cycles are not checked here; see
    /// [`IncrementalTopoSolver`](crate::algs::incremental::IncrementalTopoSolver)
    /// for order-maintaining insertion.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;
        let run = &mut self.adjacency[u as usize];
        let Err(slot) = run.binary_search(&v) else {
            return Ok(false);
        };
        if self.edge_count >= EDGE_CAPACITY {
            return Err(GraphError::EdgeCapacityExceeded(self.edge_count + 1));
        }
        run.insert(slot, v);
        self.in_degree[v as usize] += 1;
        self.edge_count += 1;
        self.touch();
        Ok(true)
    }

    /// Undo of [`add_edge`](Self::add_edge) for the incremental solver's
    /// rollback. Returns whether the edge was present.
    pub(crate) fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let Some(run) = self.adjacency.get_mut(u as usize) else {
            return false;
        };
        let Ok(slot) = run.binary_search(&v) else {
            return false;
        };
        run.remove(slot);
        self.in_degree[v as usize] -= 1;
        self.edge_count -= 1;
        self.touch();
        true
    }

    /// Whether `u → v` is stored.
    #[inline]
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(u as usize)
            .is_some_and(|run| run.binary_search(&v).is_ok())
    }

    /// Successors of `u` straight from the mutable adjacency lists.
    ///
    /// Same contents as [`Graph::neighbor_span`] but never forces a view
    /// rebuild, which keeps per-insertion work local.
    #[inline]
    pub fn successors(&self, u: NodeId) -> &[NodeId] {
        self.adjacency.get(u as usize).map_or(&[][..], Vec::as_slice)
    }

    /// Per-node in-degree cache.
    #[inline]
    pub fn in_degrees(&self) -> &[u32] {
        &self.in_degree
    }

    /// Mutation counter; bumped by every structural change.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The CSR view, rebuilt first if the adjacency changed since it was
    /// last derived.
    pub fn csr(&self) -> &FrozenCsr {
        self.csr.get_or_init(|| {
            log::debug!(
                "rebuilding CSR view (generation {}, {} nodes, {} edges)",
                self.generation,
                self.adjacency.len(),
                self.edge_count
            );
            FrozenCsr::from_sorted_adjacency(&self.adjacency, self.generation)
        })
    }

    /// The varint view, built from the CSR view on first use.
    pub fn build_varint(&self) -> &VarintView {
        self.varint.get_or_init(|| {
            let view = VarintView::from_csr(self.csr());
            log::debug!(
                "built varint view (generation {}): {} bytes for {} edges",
                self.generation,
                view.bytes.len(),
                self.edge_count
            );
            view
        })
    }

    /// Checked successor lookup.
    pub fn try_neighbor_span(&self, u: NodeId) -> Result<&[NodeId], GraphError> {
        self.check_node(u)?;
        Ok(self.csr().run(u as usize))
    }

    /// Decode the successors of `u` from the varint view.
    #[inline]
    pub fn varint_neighbors(&self, u: NodeId) -> VarintNeighbors<'_> {
        self.build_varint().neighbors(u)
    }

    /// Visit the successors of `u`, decoded from the varint view.
    pub fn for_each_neighbor_varint<F: FnMut(NodeId)>(&self, u: NodeId, f: F) {
        self.varint_neighbors(u).for_each(f);
    }

    /// Snapshot of the current CSR arrays. Shares storage with the cached
    /// view; the snapshot stays valid after later mutations and carries the
    /// generation it was taken at.
    pub fn export_csr(&self) -> FrozenCsr {
        self.csr().clone()
    }

    /// Sizes of the derived views (forces the CSR view, not the varint one).
    pub fn memory_footprint(&self) -> MemoryFootprint {
        MemoryFootprint {
            dense_bytes: self.csr().byte_size(),
            varint_bytes: self.varint.get().map_or(0, VarintView::byte_size),
        }
    }

    #[inline]
    fn check_node(&self, u: NodeId) -> Result<(), GraphError> {
        if (u as usize) < self.adjacency.len() {
            Ok(())
        } else {
            Err(GraphError::out_of_range(u, self.adjacency.len()))
        }
    }

    fn touch(&mut self) {
        self.generation += 1;
        self.invalidate_cache();
    }
}

impl InvalidateCache for CompressedGraph {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.csr.take();
        self.varint.take();
    }
}

impl Graph for CompressedGraph {
    #[inline]
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    fn neighbor_span(&self, u: NodeId) -> &[NodeId] {
        self.csr().run(u as usize)
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl DebugInvariants for CompressedGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "CompressedGraph");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        let n = self.adjacency.len();
        if self.in_degree.len() != n {
            return Err(violation!(
                "in_degree has {} entries for {n} nodes",
                self.in_degree.len()
            ));
        }
        let mut in_degree = vec![0u32; n];
        let mut edges = 0usize;
        for (u, run) in self.adjacency.iter().enumerate() {
            if run.windows(2).any(|w| w[0] >= w[1]) {
                return Err(violation!("adjacency of node {u} is not sorted and deduplicated"));
            }
            for &v in run {
                if v as usize >= n {
                    return Err(GraphError::out_of_range(v, n));
                }
                in_degree[v as usize] += 1;
            }
            edges += run.len();
        }
        if edges != self.edge_count {
            return Err(violation!(
                "edge_count = {} but {edges} edges stored",
                self.edge_count
            ));
        }
        if let Some(v) = (0..n).find(|&v| in_degree[v] != self.in_degree[v]) {
            return Err(violation!(
                "in_degree[{v}] = {} but {} incoming edges",
                self.in_degree[v],
                in_degree[v]
            ));
        }

        let csr = self.csr();
        csr.validate_invariants()?;
        if csr.node_count() != n {
            return Err(violation!("CSR covers {} of {n} nodes", csr.node_count()));
        }
        if let Some(u) = (0..n).find(|&u| csr.run(u) != self.adjacency[u].as_slice()) {
            return Err(violation!("CSR run of node {u} differs from adjacency"));
        }

        if let Some(varint) = self.varint.get() {
            if varint.node_count() != n {
                return Err(violation!("varint view covers {} of {n} nodes", varint.node_count()));
            }
            for u in 0..n {
                if !varint.neighbors(u as NodeId).eq(csr.run(u).iter().copied()) {
                    return Err(violation!("varint run of node {u} does not decode to CSR run"));
                }
            }
        }
        Ok(())
    }
}
