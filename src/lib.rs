#![cfg_attr(docsrs, feature(doc_cfg))]
//! # csr-toposort
//!
//! csr-toposort is a small library for ordering dependency graphs. It keeps a
//! mutable directed graph over dense `u32` ids, derives compact read views
//! from it on demand, and runs a family of topological-sort solvers over
//! those views, including one that maintains its order while edges arrive.
//!
//! ## Features
//! - [`CompressedGraph`](graph::CompressedGraph): sorted adjacency lists with
//!   lazily rebuilt CSR and varint (LEB128 delta) views
//! - Batch solvers: DFS, FIFO Kahn, lexicographic Kahn (min/max tie-break),
//!   level-synchronous Kahn (parallel with the `rayon` feature)
//! - [`IncrementalTopoSolver`](algs::IncrementalTopoSolver): local re-sorting
//!   on backward insertions, with the edge rolled back if it closes a cycle
//! - Layer depths and a 2.5D ring layout for rendering
//!
//! ## Determinism
//!
//! Every solver is deterministic for a given graph. The parallel solver sorts
//! each frontier, so its output does not depend on thread scheduling.
//!
//! ## Usage
//! ```rust
//! use csr_toposort::prelude::*;
//!
//! let mut g = CompressedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(SolverKind::Kahn.solve(&mut g).order, vec![0, 1, 2, 3]);
//!
//! let mut inc = IncrementalTopoSolver::new(&mut g);
//! assert!(inc.add_edge(3, 0).unwrap().has_cycle());
//! ```
//!
//! ## Cargo features
//! - `rayon`: run [`ParallelKahnSolver`](algs::ParallelKahnSolver) on a rayon pool
//! - `strict-invariants` / `check-invariants`: keep internal invariant
//!   checks in release builds

pub mod algs;
pub mod debug_invariants;
pub mod graph;
pub mod graph_error;
pub mod scenario;

pub use debug_invariants::DebugInvariants;
pub use graph_error::GraphError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::incremental::{EdgeInsertion, IncrementalTopoSolver};
    pub use crate::algs::kahn::TieBreak;
    pub use crate::algs::layout::{LayoutConfig, LayoutPoint, compute_layers, make_layered_layout};
    pub use crate::algs::parallel::ParallelConfig;
    pub use crate::algs::toposort::{SolverKind, TopoOrder, TopoSolver};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph::{CompressedGraph, FrozenCsr, Graph, InvalidateCache, NodeId};
    pub use crate::graph_error::GraphError;
    pub use crate::scenario::{Scenario, ScenarioResult};
}
