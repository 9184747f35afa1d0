//! Frozen CSR (Compressed Sparse Row) adjacency.
//!
//! Immutable, cache-friendly adjacency: `offsets[u]..offsets[u + 1]` indexes
//! the ascending successors of `u` inside one flat `neighbors` array. This is
//! the dense view [`CompressedGraph`](super::CompressedGraph) derives lazily
//! and the snapshot it hands out from `export_csr`. Arrays are shared through
//! `Arc`, so cloning a frozen view never copies adjacency.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::NodeId;
use super::graph_trait::Graph;
use crate::debug_invariants::{DebugInvariants, violation};
use crate::graph_error::GraphError;

/// Immutable CSR adjacency tagged with the store generation that built it.
///
/// Deserialization validates the layout like [`FrozenCsr::try_from_parts`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCsr")]
pub struct FrozenCsr {
    /// Per-node start index into `neighbors` (size n+1, non-decreasing).
    pub offsets: Arc<[u32]>,
    /// Concatenated ascending successor runs (size `offsets[n]`).
    pub neighbors: Arc<[NodeId]>,
    /// Mutation generation of the store this view was derived from.
    pub generation: u64,
}

/// Wire shape of [`FrozenCsr`] before its layout is checked.
#[derive(Deserialize)]
struct RawCsr {
    offsets: Vec<u32>,
    neighbors: Vec<NodeId>,
    #[serde(default)]
    generation: u64,
}

impl TryFrom<RawCsr> for FrozenCsr {
    type Error = GraphError;

    fn try_from(raw: RawCsr) -> Result<Self, Self::Error> {
        let mut csr = Self::try_from_parts(raw.offsets, raw.neighbors)?;
        csr.generation = raw.generation;
        Ok(csr)
    }
}

impl Default for FrozenCsr {
    fn default() -> Self {
        Self {
            offsets: Arc::from([0u32]),
            neighbors: Arc::from([]),
            generation: 0,
        }
    }
}

impl FrozenCsr {
    /// Flatten sorted adjacency lists. Callers guarantee the total edge
    /// count fits in a `u32`.
    pub(crate) fn from_sorted_adjacency(adjacency: &[Vec<NodeId>], generation: u64) -> Self {
        let n = adjacency.len();
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0u32);
        let total: usize = adjacency.iter().map(Vec::len).sum();
        let mut neighbors = Vec::with_capacity(total);
        for run in adjacency {
            neighbors.extend_from_slice(run);
            offsets.push(neighbors.len() as u32);
        }
        Self {
            offsets: offsets.into(),
            neighbors: neighbors.into(),
            generation,
        }
    }

    /// Build from raw CSR arrays (e.g. deserialized from elsewhere),
    /// checking the layout before accepting it.
    pub fn try_from_parts(offsets: Vec<u32>, neighbors: Vec<NodeId>) -> Result<Self, GraphError> {
        let csr = Self {
            offsets: offsets.into(),
            neighbors: neighbors.into(),
            generation: 0,
        };
        csr.validate_invariants()?;
        Ok(csr)
    }

    /// Successor run of `u` by index; empty for unknown nodes or a span
    /// that falls outside `neighbors`.
    #[inline]
    pub fn run(&self, u: usize) -> &[NodeId] {
        if u >= self.node_count() {
            return &[];
        }
        let lo = self.offsets[u] as usize;
        let hi = self.offsets[u + 1] as usize;
        self.neighbors.get(lo..hi).unwrap_or(&[])
    }

    /// Offsets and neighbors as plain vectors.
    pub fn into_parts(self) -> (Vec<u32>, Vec<NodeId>) {
        (self.offsets.to_vec(), self.neighbors.to_vec())
    }

    /// Bytes held by the dense arrays.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.neighbors.len() * std::mem::size_of::<NodeId>()
            + self.offsets.len() * std::mem::size_of::<u32>()
    }
}

impl Graph for FrozenCsr {
    #[inline]
    fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[inline]
    fn neighbor_span(&self, u: NodeId) -> &[NodeId] {
        self.run(u as usize)
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.neighbors.len()
    }
}

impl DebugInvariants for FrozenCsr {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "FrozenCsr");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        let Some(&first) = self.offsets.first() else {
            return Err(violation!("offsets table is empty"));
        };
        if first != 0 {
            return Err(violation!("offsets[0] = {first}, expected 0"));
        }
        if let Some(i) = self.offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(violation!(
                "offsets decrease at node {i}: {} > {}",
                self.offsets[i],
                self.offsets[i + 1]
            ));
        }
        let last = self.offsets[self.offsets.len() - 1] as usize;
        if last != self.neighbors.len() {
            return Err(violation!(
                "offsets[n] = {last} but {} neighbors stored",
                self.neighbors.len()
            ));
        }
        let n = self.node_count();
        for u in 0..n {
            let run = self.run(u);
            if let Some(&bad) = run.iter().find(|&&v| v as usize >= n) {
                return Err(GraphError::out_of_range(bad, n));
            }
            if run.windows(2).any(|w| w[0] >= w[1]) {
                return Err(violation!("run of node {u} is not strictly ascending"));
            }
        }
        Ok(())
    }
}
