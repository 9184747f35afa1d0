//! Incremental topological order under edge insertion.
//!
//! [`IncrementalTopoSolver`] owns the mutable borrow of a [`CompressedGraph`]
//! and keeps `order`/`position` valid across [`add_edge`] calls:
//!
//! * **fast path**: `position[u] < position[v]`, the new edge already points
//!   forward and nothing moves;
//! * **slow path**: collect the nodes reachable from `v` without passing
//!   `position[u]` (plus `u` itself), sort them locally with Kahn and rewrite
//!   only the window `[position[v], position[u]]`: untouched window nodes keep
//!   their relative order and move up, the sorted block fills the tail of the
//!   window;
//! * **cycle**: the local sort cannot place every collected node. The edge is
//!   taken back out of the store and the order is left as it was.
//!
//! Work on the slow path is proportional to the window, never to the whole
//! graph; the derived CSR/varint views are not touched.
//!
//! [`add_edge`]: IncrementalTopoSolver::add_edge

use std::collections::VecDeque;

use hashbrown::HashMap;

use super::kahn::kahn_toposort;
use super::toposort::{TopoOrder, TopoSolver};
use crate::debug_invariants::{DebugInvariants, violation};
use crate::graph::{CompressedGraph, Graph, NodeId};
use crate::graph_error::GraphError;

/// Outcome of [`IncrementalTopoSolver::add_edge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The maintained order was already consistent with the edge.
    Unchanged,
    /// Part of the order was re-sorted; `affected` nodes were moved.
    Reordered { affected: usize },
    /// The edge would close a cycle; it was not kept.
    Cycle,
}

impl EdgeInsertion {
    #[inline]
    pub fn has_cycle(self) -> bool {
        matches!(self, EdgeInsertion::Cycle)
    }
}

/// Maintains a topological order of a graph while edges are inserted.
#[derive(Debug)]
pub struct IncrementalTopoSolver<'g> {
    graph: &'g mut CompressedGraph,
    order: Vec<NodeId>,
    position: Vec<usize>,
    initialized: bool,
}

impl<'g> IncrementalTopoSolver<'g> {
    /// Binds to `graph`. No work happens until the first query or insertion.
    pub fn new(graph: &'g mut CompressedGraph) -> Self {
        Self {
            graph,
            order: Vec::new(),
            position: Vec::new(),
            initialized: false,
        }
    }

    /// Run one full Kahn pass if no order is held yet.
    ///
    /// # Errors
    /// [`GraphError::CycleDetected`] if the bound graph is already cyclic.
    pub fn ensure_initialized(&mut self) -> Result<(), GraphError> {
        if self.initialized {
            return Ok(());
        }
        let order = kahn_toposort(&*self.graph).into_order()?;
        let mut position = vec![0usize; order.len()];
        for (i, &x) in order.iter().enumerate() {
            position[x as usize] = i;
        }
        self.order = order;
        self.position = position;
        self.initialized = true;
        log::debug!("incremental: initialized order over {} nodes", self.order.len());
        Ok(())
    }

    /// Discard the maintained order and recompute it from scratch.
    pub fn rebuild(&mut self) -> Result<(), GraphError> {
        self.initialized = false;
        self.order.clear();
        self.position.clear();
        self.ensure_initialized()
    }

    /// Insert `u → v` and restore the order.
    ///
    /// Inserting an edge that is already present is [`EdgeInsertion::Unchanged`].
    /// When the edge would close a cycle it is removed again, so graph and
    /// order stay in agreement and the solver remains usable.
    ///
    /// # Errors
    /// * [`GraphError::NodeOutOfRange`] for a bad id, before anything changes;
    /// * [`GraphError::CycleDetected`] if the graph was cyclic before this
    ///   call and no order could be initialized.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeInsertion, GraphError> {
        let n = self.graph.node_count();
        for id in [u, v] {
            if id as usize >= n {
                return Err(GraphError::out_of_range(id, n));
            }
        }
        self.ensure_initialized()?;
        let inserted = self.graph.add_edge(u, v)?;

        if self.position[u as usize] < self.position[v as usize] {
            log::trace!("incremental: {u} -> {v} already forward");
            return Ok(EdgeInsertion::Unchanged);
        }

        match self.reorder(u, v) {
            Some(affected) => {
                log::trace!("incremental: {u} -> {v} reordered {affected} nodes");
                self.debug_assert_invariants();
                Ok(EdgeInsertion::Reordered { affected })
            }
            None => {
                if inserted {
                    self.graph.remove_edge(u, v);
                }
                log::warn!("incremental: rejected {u} -> {v}, it closes a cycle");
                Ok(EdgeInsertion::Cycle)
            }
        }
    }

    /// Re-sort the window `[position[v], position[u]]` after `u → v` was
    /// inserted backwards. Returns the number of moved nodes, or `None` on a
    /// cycle (with the order untouched).
    fn reorder(&mut self, u: NodeId, v: NodeId) -> Option<usize> {
        let lo = self.position[v as usize];
        let hi = self.position[u as usize];

        // Forward reach of v that is not yet behind u.
        let mut affected = vec![v];
        let mut local: HashMap<NodeId, usize> = HashMap::new();
        local.insert(v, 0);
        let mut queue = VecDeque::from([v]);
        while let Some(x) = queue.pop_front() {
            for &y in self.graph.successors(x) {
                if self.position[y as usize] <= hi && !local.contains_key(&y) {
                    local.insert(y, 0);
                    affected.push(y);
                    queue.push_back(y);
                }
            }
        }
        if !local.contains_key(&u) {
            local.insert(u, 0);
            affected.push(u);
        }

        // Seed in current order so independent nodes keep their relative place.
        affected.sort_unstable_by_key(|&x| self.position[x as usize]);
        for (i, &x) in affected.iter().enumerate() {
            local.insert(x, i);
        }

        let k = affected.len();
        let mut indeg = vec![0u32; k];
        for &x in &affected {
            for y in self.graph.successors(x) {
                if let Some(&j) = local.get(y) {
                    indeg[j] += 1;
                }
            }
        }
        let mut ready: VecDeque<usize> = (0..k).filter(|&i| indeg[i] == 0).collect();
        let mut block = Vec::with_capacity(k);
        while let Some(i) = ready.pop_front() {
            let x = affected[i];
            block.push(x);
            for y in self.graph.successors(x) {
                if let Some(&j) = local.get(y) {
                    indeg[j] -= 1;
                    if indeg[j] == 0 {
                        ready.push_back(j);
                    }
                }
            }
        }
        if block.len() < k {
            return None;
        }

        let mut window: Vec<NodeId> = self.order[lo..=hi]
            .iter()
            .copied()
            .filter(|x| !local.contains_key(x))
            .collect();
        window.extend_from_slice(&block);
        for (offset, &x) in window.iter().enumerate() {
            self.order[lo + offset] = x;
            self.position[x as usize] = lo + offset;
        }
        Some(k)
    }

    /// The maintained order (empty before initialization).
    #[inline]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Position of `u` in the maintained order, if initialized and in range.
    #[inline]
    pub fn position(&self, u: NodeId) -> Option<usize> {
        self.position.get(u as usize).copied()
    }

    /// The bound graph.
    #[inline]
    pub fn graph(&self) -> &CompressedGraph {
        &*self.graph
    }
}

impl TopoSolver for IncrementalTopoSolver<'_> {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn run(&mut self) -> TopoOrder {
        match self.ensure_initialized() {
            Ok(()) => TopoOrder::acyclic(self.order.clone()),
            Err(_) => TopoOrder::cyclic(Vec::new()),
        }
    }
}

impl DebugInvariants for IncrementalTopoSolver<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "IncrementalTopoSolver");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        if !self.initialized {
            return Ok(());
        }
        let n = self.graph.node_count();
        if self.order.len() != n || self.position.len() != n {
            return Err(violation!(
                "order/position sized {}/{} for {n} nodes",
                self.order.len(),
                self.position.len()
            ));
        }
        for (i, &x) in self.order.iter().enumerate() {
            if self.position.get(x as usize) != Some(&i) {
                return Err(violation!("position of node {x} is not {i}"));
            }
        }
        for x in 0..n as NodeId {
            for &y in self.graph.successors(x) {
                if self.position[x as usize] >= self.position[y as usize] {
                    return Err(violation!("edge {x} -> {y} points backwards"));
                }
            }
        }
        Ok(())
    }
}
