//! GraphError: Unified error type for csr-toposort public APIs
//!
//! Structural problems (bad ids, capacity, broken invariants) are reported
//! through this type. A cycle found by a solver is *not* an error: it is
//! carried as data in [`TopoOrder`](crate::algs::toposort::TopoOrder). The
//! [`GraphError::CycleDetected`] variant is reserved for the places where a
//! cycle makes an operation impossible rather than merely unsuccessful.

use crate::graph::NodeId;
use thiserror::Error;

/// Unified error type for graph store and solver operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node id (bulk load, edge insertion or checked lookup) is not below the node count.
    #[error("node id {node} out of range (node_count = {node_count})")]
    NodeOutOfRange { node: NodeId, node_count: usize },
    /// The total edge count no longer fits a 32-bit CSR offset.
    #[error("edge count {0} exceeds the 32-bit CSR offset capacity")]
    EdgeCapacityExceeded(usize),
    /// The graph has a cycle; no topological order exists.
    #[error("graph has a cycle; topological order does not exist")]
    CycleDetected,
    /// An internal consistency check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// A solver name did not match any known solver.
    #[error("unknown solver `{0}`")]
    UnknownSolver(String),
}

impl GraphError {
    #[inline]
    pub(crate) fn out_of_range(node: NodeId, node_count: usize) -> Self {
        GraphError::NodeOutOfRange { node, node_count }
    }
}
