//! Re-export public algorithms.

pub mod dfs;
pub mod incremental;
pub mod kahn;
pub mod layout;
pub mod parallel;
pub mod toposort;

pub use dfs::{DfsTopoSolver, dfs_toposort};
pub use incremental::{EdgeInsertion, IncrementalTopoSolver};
pub use kahn::{KahnTopoSolver, LexicographicKahnSolver, TieBreak, kahn_toposort, lexicographic_toposort};
pub use layout::{LayoutConfig, LayoutPoint, compute_layers, make_layered_layout};
pub use parallel::{ParallelConfig, ParallelKahnSolver, parallel_kahn_toposort};
pub use toposort::{SolverKind, TopoOrder, TopoSolver, compute_in_degrees};
