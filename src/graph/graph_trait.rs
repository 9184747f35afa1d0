//! The read contract every solver and the layout projector depend on.
//!
//! Solvers never see a concrete storage layout: they ask for the node count
//! and for the successors of a node as a contiguous slice. Implementors must
//! hand back successors of `u` for `u < node_count()`, each of them itself
//! below `node_count()`; for any other `u` the slice is empty rather than a
//! panic.

use super::NodeId;

/// Directed graph over dense node ids `0..node_count()`.
pub trait Graph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Successors of `u`, borrowed for as long as the graph is borrowed.
    ///
    /// Ascending for [`CompressedGraph`](super::CompressedGraph) and
    /// [`FrozenCsr`](super::FrozenCsr); plain adjacency lists return their
    /// entries as stored.
    fn neighbor_span(&self, u: NodeId) -> &[NodeId];

    /// Visit each successor of `u`.
    #[inline]
    fn for_each_neighbor<F>(&self, u: NodeId, mut f: F)
    where
        F: FnMut(NodeId),
        Self: Sized,
    {
        for &v in self.neighbor_span(u) {
            f(v);
        }
    }

    /// Out-degree of `u`.
    #[inline]
    fn out_degree(&self, u: NodeId) -> usize {
        self.neighbor_span(u).len()
    }

    /// Total number of edges.
    fn edge_count(&self) -> usize {
        (0..self.node_count())
            .map(|u| self.neighbor_span(u as NodeId).len())
            .sum()
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    #[inline]
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
    #[inline]
    fn neighbor_span(&self, u: NodeId) -> &[NodeId] {
        (**self).neighbor_span(u)
    }
    #[inline]
    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }
}

/// Plain adjacency lists.
///
/// Successor ids are taken as they are: an id at or above `len()` makes the
/// solvers index out of bounds. Lists from an untrusted source should go
/// through [`CompressedGraph::from_adj`](super::CompressedGraph::from_adj),
/// which rejects them with [`GraphError::NodeOutOfRange`](crate::graph_error::GraphError).
impl Graph for Vec<Vec<NodeId>> {
    #[inline]
    fn node_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn neighbor_span(&self, u: NodeId) -> &[NodeId] {
        self.get(u as usize).map_or(&[][..], Vec::as_slice)
    }
}
