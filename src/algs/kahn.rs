//! Kahn's algorithm: FIFO and lexicographic (priority) variants.
//!
//! Both seed the ready set with the zero in-degree nodes, repeatedly emit a
//! ready node and release its successors. A graph is cyclic iff fewer than
//! `node_count` nodes get emitted.
//!
//! ## Complexity
//! - FIFO: **O(|V| + |E|)** time, **O(|V|)** space.
//! - Lexicographic: **O((|V| + |E|) log |V|)** time, **O(|V|)** space.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use serde::{Deserialize, Serialize};

use super::toposort::{TopoOrder, TopoSolver, compute_in_degrees};
use crate::graph::{Graph, NodeId};

/// Which of several simultaneously ready nodes goes first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Smallest id first.
    MinFirst,
    /// Largest id first.
    MaxFirst,
}

/// Kahn's algorithm with a FIFO ready queue.
pub fn kahn_toposort<G: Graph + ?Sized>(graph: &G) -> TopoOrder {
    let n = graph.node_count();
    let mut indeg = compute_in_degrees(graph);
    let mut queue: VecDeque<NodeId> = (0..n as NodeId)
        .filter(|&u| indeg[u as usize] == 0)
        .collect();
    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        order.push(u);
        for &v in graph.neighbor_span(u) {
            let d = &mut indeg[v as usize];
            *d -= 1;
            if *d == 0 {
                queue.push_back(v);
            }
        }
    }
    TopoOrder::from_emitted(order, n)
}

enum ReadySet {
    Min(BinaryHeap<Reverse<NodeId>>),
    Max(BinaryHeap<NodeId>),
}

impl ReadySet {
    fn new(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::MinFirst => ReadySet::Min(BinaryHeap::new()),
            TieBreak::MaxFirst => ReadySet::Max(BinaryHeap::new()),
        }
    }

    fn push(&mut self, u: NodeId) {
        match self {
            ReadySet::Min(h) => h.push(Reverse(u)),
            ReadySet::Max(h) => h.push(u),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            ReadySet::Min(h) => h.pop().map(|Reverse(u)| u),
            ReadySet::Max(h) => h.pop(),
        }
    }
}

/// Kahn's algorithm with a priority ready set: among ready nodes the
/// smallest (or largest) id is always emitted first, so the result is the
/// lexicographically smallest (or largest) topological order.
pub fn lexicographic_toposort<G: Graph + ?Sized>(graph: &G, tie_break: TieBreak) -> TopoOrder {
    let n = graph.node_count();
    let mut indeg = compute_in_degrees(graph);
    let mut ready = ReadySet::new(tie_break);
    for u in 0..n as NodeId {
        if indeg[u as usize] == 0 {
            ready.push(u);
        }
    }
    let mut order = Vec::with_capacity(n);
    while let Some(u) = ready.pop() {
        order.push(u);
        for &v in graph.neighbor_span(u) {
            let d = &mut indeg[v as usize];
            *d -= 1;
            if *d == 0 {
                ready.push(v);
            }
        }
    }
    TopoOrder::from_emitted(order, n)
}

/// FIFO Kahn solver over any [`Graph`].
#[derive(Debug)]
pub struct KahnTopoSolver<'g, G: Graph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: Graph + ?Sized> KahnTopoSolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }
}

impl<G: Graph + ?Sized> TopoSolver for KahnTopoSolver<'_, G> {
    fn name(&self) -> &'static str {
        "kahn"
    }

    fn run(&mut self) -> TopoOrder {
        kahn_toposort(self.graph)
    }
}

/// Lexicographic Kahn solver.
#[derive(Debug)]
pub struct LexicographicKahnSolver<'g, G: Graph + ?Sized> {
    graph: &'g G,
    tie_break: TieBreak,
}

impl<'g, G: Graph + ?Sized> LexicographicKahnSolver<'g, G> {
    pub fn new(graph: &'g G, tie_break: TieBreak) -> Self {
        Self { graph, tie_break }
    }
}

impl<G: Graph + ?Sized> TopoSolver for LexicographicKahnSolver<'_, G> {
    fn name(&self) -> &'static str {
        match self.tie_break {
            TieBreak::MinFirst => "lexi_min",
            TieBreak::MaxFirst => "lexi_max",
        }
    }

    fn run(&mut self) -> TopoOrder {
        lexicographic_toposort(self.graph, self.tie_break)
    }
}
