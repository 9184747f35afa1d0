//! Small named dependency graphs and a one-call "build, sort, lay out" runner.
//!
//! Each sample models a familiar ordering problem (course prerequisites,
//! task dependencies, package resolution, reporting lines) as an edge list
//! over dense ids.

use serde::{Deserialize, Serialize};

use crate::algs::layout::{LayoutConfig, LayoutPoint, make_layered_layout};
use crate::algs::toposort::SolverKind;
use crate::graph::{CompressedGraph, NodeId};
use crate::graph_error::GraphError;

/// A named graph given as node count plus edge list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub node_count: usize,
    pub edges: Vec<(NodeId, NodeId)>,
}

/// Outcome of [`Scenario::run`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub solver: SolverKind,
    pub has_cycle: bool,
    pub order: Vec<NodeId>,
    /// Present when a layout was requested and the graph is acyclic.
    pub layout: Option<Vec<LayoutPoint>>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, node_count: usize, edges: Vec<(NodeId, NodeId)>) -> Self {
        Self {
            name: name.into(),
            node_count,
            edges,
        }
    }

    /// Course prerequisites: 8 courses.
    pub fn course() -> Self {
        Self::new(
            "course",
            8,
            vec![(0, 2), (1, 2), (2, 3), (2, 4), (3, 5), (4, 6), (6, 7)],
        )
    }

    /// Task dependencies: 7 tasks.
    pub fn task() -> Self {
        Self::new("task", 7, vec![(0, 3), (1, 3), (1, 4), (3, 5), (4, 5), (5, 6)])
    }

    /// Package resolution: 6 packages.
    pub fn package() -> Self {
        Self::new("package", 6, vec![(0, 2), (1, 2), (2, 3), (2, 4), (4, 5)])
    }

    /// Reporting hierarchy: 7 people.
    pub fn social() -> Self {
        Self::new(
            "social",
            7,
            vec![(0, 1), (0, 2), (1, 3), (2, 4), (3, 5), (4, 5), (5, 6)],
        )
    }

    /// All built-in samples.
    pub fn samples() -> Vec<Self> {
        vec![Self::course(), Self::task(), Self::package(), Self::social()]
    }

    /// Built-in sample by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::samples()
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Build the store from the edge list.
    pub fn graph(&self) -> Result<CompressedGraph, GraphError> {
        CompressedGraph::from_edges(self.node_count, &self.edges)
    }

    /// Build the graph, sort it with `solver` and, if `layout` is given and
    /// the graph is acyclic, place it.
    pub fn run(
        &self,
        solver: SolverKind,
        layout: Option<&LayoutConfig>,
    ) -> Result<ScenarioResult, GraphError> {
        let mut graph = self.graph()?;
        graph.build_varint();
        let topo = solver.solve(&mut graph);
        let layout = match layout {
            Some(cfg) if !topo.has_cycle => Some(make_layered_layout(&graph, &topo.order, cfg)),
            _ => None,
        };
        log::info!(
            "scenario {}: {solver} ordered {} nodes, cycle = {}",
            self.name,
            topo.order.len(),
            topo.has_cycle
        );
        Ok(ScenarioResult {
            solver,
            has_cycle: topo.has_cycle,
            order: topo.order,
            layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_addressable_by_name() {
        for s in Scenario::samples() {
            assert_eq!(Scenario::by_name(&s.name), Some(s.clone()));
        }
        assert_eq!(Scenario::by_name(" Course ").map(|s| s.node_count), Some(8));
        assert!(Scenario::by_name("nope").is_none());
    }

    #[test]
    fn run_with_layout_places_every_node() {
        let res = Scenario::package()
            .run(SolverKind::Kahn, Some(&LayoutConfig::default()))
            .unwrap();
        assert!(!res.has_cycle);
        assert_eq!(res.order.len(), 6);
        let layout = res.layout.unwrap();
        assert_eq!(layout.len(), 6);
        assert_eq!(layout.iter().map(|p| p.layer).max(), Some(3));
    }

    #[test]
    fn cyclic_scenario_has_no_layout() {
        let s = Scenario::new("loop", 2, vec![(0, 1), (1, 0)]);
        let res = s.run(SolverKind::Dfs, Some(&LayoutConfig::default())).unwrap();
        assert!(res.has_cycle);
        assert!(res.layout.is_none());
    }

    #[test]
    fn bad_edge_is_an_error() {
        let s = Scenario::new("bad", 2, vec![(0, 5)]);
        assert!(matches!(
            s.run(SolverKind::Kahn, None),
            Err(GraphError::NodeOutOfRange { node: 5, .. })
        ));
    }
}
