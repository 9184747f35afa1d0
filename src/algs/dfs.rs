//! Depth-first topological sort with three-state marking.
//!
//! Runs on an explicit work stack, so arbitrarily deep graphs cannot
//! overflow the call stack. A successor still *in progress* closes a
//! back-edge, i.e. a cycle. Otherwise the order is the reverse of the
//! finish order.
//!
//! ## Complexity
//! - Time: **O(|V| + |E|)**
//! - Space: **O(|V|)**

use super::toposort::{TopoOrder, TopoSolver};
use crate::graph::{Graph, NodeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// DFS solver over any [`Graph`].
#[derive(Debug)]
pub struct DfsTopoSolver<'g, G: Graph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: Graph + ?Sized> DfsTopoSolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }
}

/// Depth-first topological sort of `graph`. Roots are tried in id order.
pub fn dfs_toposort<G: Graph + ?Sized>(graph: &G) -> TopoOrder {
    let n = graph.node_count();
    let mut mark = vec![Mark::Unvisited; n];
    let mut finished = Vec::with_capacity(n);
    // (node, index of the next successor to look at)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for root in 0..n {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        mark[root] = Mark::InProgress;
        stack.push((root as NodeId, 0));

        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            let succ = graph.neighbor_span(u);
            if let Some(&v) = succ.get(next) {
                top.1 += 1;
                match mark[v as usize] {
                    Mark::InProgress => return TopoOrder::cyclic(Vec::new()),
                    Mark::Unvisited => {
                        mark[v as usize] = Mark::InProgress;
                        stack.push((v, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                mark[u as usize] = Mark::Done;
                finished.push(u);
                stack.pop();
            }
        }
    }

    finished.reverse();
    TopoOrder::acyclic(finished)
}

impl<G: Graph + ?Sized> TopoSolver for DfsTopoSolver<'_, G> {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn run(&mut self) -> TopoOrder {
        dfs_toposort(self.graph)
    }
}
