//! Common surface of the topological-sort solvers.
//!
//! Every solver answers the same question over a [`Graph`]: either a linear
//! order in which every edge points forward, or the fact that none exists.
//! A cycle is an ordinary outcome, reported through [`TopoOrder::has_cycle`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dfs::DfsTopoSolver;
use super::incremental::IncrementalTopoSolver;
use super::kahn::{KahnTopoSolver, LexicographicKahnSolver, TieBreak};
use super::parallel::{ParallelConfig, ParallelKahnSolver};
use crate::graph::{CompressedGraph, Graph, NodeId};
use crate::graph_error::GraphError;

/// Result of one solver run.
///
/// `order` is only a topological order when `has_cycle` is false. On a
/// cycle, Kahn-style solvers leave the prefix they managed to linearize and
/// the DFS solver leaves it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoOrder {
    pub has_cycle: bool,
    pub order: Vec<NodeId>,
}

impl TopoOrder {
    #[inline]
    pub fn acyclic(order: Vec<NodeId>) -> Self {
        Self {
            has_cycle: false,
            order,
        }
    }

    #[inline]
    pub fn cyclic(partial: Vec<NodeId>) -> Self {
        Self {
            has_cycle: true,
            order: partial,
        }
    }

    /// Kahn-style outcome: cyclic iff fewer than `n` nodes were emitted.
    #[inline]
    pub(crate) fn from_emitted(order: Vec<NodeId>, n: usize) -> Self {
        if order.len() == n {
            Self::acyclic(order)
        } else {
            Self::cyclic(order)
        }
    }

    #[inline]
    pub fn is_dag(&self) -> bool {
        !self.has_cycle
    }

    /// The order, or [`GraphError::CycleDetected`].
    pub fn into_order(self) -> Result<Vec<NodeId>, GraphError> {
        if self.has_cycle {
            Err(GraphError::CycleDetected)
        } else {
            Ok(self.order)
        }
    }
}

/// A topological-sort strategy bound to its graph.
pub trait TopoSolver {
    /// Stable short name (`"dfs"`, `"kahn"`, …).
    fn name(&self) -> &'static str;
    /// Compute (or, for stateful solvers, report) the order.
    fn run(&mut self) -> TopoOrder;
}

/// In-degree of every node, counted from the graph's edges.
pub fn compute_in_degrees<G: Graph + ?Sized>(graph: &G) -> Vec<u32> {
    let n = graph.node_count();
    let mut indeg = vec![0u32; n];
    for u in 0..n {
        for &v in graph.neighbor_span(u as NodeId) {
            indeg[v as usize] += 1;
        }
    }
    indeg
}

/// Closed set of solvers, selectable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    Dfs,
    Kahn,
    LexiMin,
    LexiMax,
    ParallelKahn,
    Incremental,
}

impl SolverKind {
    pub const ALL: [SolverKind; 6] = [
        SolverKind::Dfs,
        SolverKind::Kahn,
        SolverKind::LexiMin,
        SolverKind::LexiMax,
        SolverKind::ParallelKahn,
        SolverKind::Incremental,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Dfs => "dfs",
            SolverKind::Kahn => "kahn",
            SolverKind::LexiMin => "lexi_min",
            SolverKind::LexiMax => "lexi_max",
            SolverKind::ParallelKahn => "parallel_kahn",
            SolverKind::Incremental => "incremental",
        }
    }

    /// Bind a solver of this kind to `graph`.
    ///
    /// The incremental solver needs exclusive access to the store, which is
    /// why the graph is borrowed mutably for every kind.
    pub fn build<'g>(self, graph: &'g mut CompressedGraph) -> Box<dyn TopoSolver + 'g> {
        match self {
            SolverKind::Dfs => Box::new(DfsTopoSolver::new(&*graph)),
            SolverKind::Kahn => Box::new(KahnTopoSolver::new(&*graph)),
            SolverKind::LexiMin => {
                Box::new(LexicographicKahnSolver::new(&*graph, TieBreak::MinFirst))
            }
            SolverKind::LexiMax => {
                Box::new(LexicographicKahnSolver::new(&*graph, TieBreak::MaxFirst))
            }
            SolverKind::ParallelKahn => {
                Box::new(ParallelKahnSolver::new(&*graph, ParallelConfig::default()))
            }
            SolverKind::Incremental => Box::new(IncrementalTopoSolver::new(graph)),
        }
    }

    /// Run this kind once over `graph`.
    pub fn solve(self, graph: &mut CompressedGraph) -> TopoOrder {
        let mut solver = self.build(graph);
        let result = solver.run();
        log::debug!(
            "{} finished: {} nodes ordered, cycle = {}",
            solver.name(),
            result.order.len(),
            result.has_cycle
        );
        result
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(SolverKind::Dfs),
            "kahn" => Ok(SolverKind::Kahn),
            "lexi_min" | "lexi" => Ok(SolverKind::LexiMin),
            "lexi_max" => Ok(SolverKind::LexiMax),
            "parallel_kahn" | "parallel" => Ok(SolverKind::ParallelKahn),
            "incremental" => Ok(SolverKind::Incremental),
            _ => Err(GraphError::UnknownSolver(s.to_string())),
        }
    }
}
