//! Level-synchronous Kahn.
//!
//! Every round emits the whole current frontier (all nodes whose in-degree
//! has dropped to zero), then releases their successors to form the next
//! frontier. With the `rayon` feature the release step fans out over a
//! thread pool using atomic in-degrees; otherwise the same rounds run on the
//! calling thread. Each frontier is sorted before it is emitted, so the
//! order is identical either way.

#[cfg(feature = "rayon")]
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use super::toposort::{TopoOrder, TopoSolver, compute_in_degrees};
use crate::graph::{Graph, NodeId};

/// Thread-pool sizing for [`ParallelKahnSolver`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Worker threads; `0` runs on rayon's global pool, any other value on a
    /// dedicated pool of that size.
    pub workers: usize,
}

/// Level-synchronous Kahn over `graph`.
///
/// Falls back to a sequential pass (with a warning) when built without
/// `rayon` or when a dedicated pool cannot be created.
pub fn parallel_kahn_toposort<G: Graph + Sync + ?Sized>(
    graph: &G,
    config: &ParallelConfig,
) -> TopoOrder {
    #[cfg(feature = "rayon")]
    {
        if config.workers == 0 {
            return levels_rayon(graph);
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
        {
            Ok(pool) => return pool.install(|| levels_rayon(graph)),
            Err(e) => log::warn!("parallel_kahn: thread pool unavailable ({e}), running sequentially"),
        }
    }
    #[cfg(not(feature = "rayon"))]
    log::warn!(
        "parallel_kahn: built without `rayon`, running sequentially (workers = {})",
        config.workers
    );
    levels_sequential(graph)
}

fn seeds(indeg: &[u32]) -> Vec<NodeId> {
    (0..indeg.len() as NodeId)
        .filter(|&u| indeg[u as usize] == 0)
        .collect()
}

fn levels_sequential<G: Graph + ?Sized>(graph: &G) -> TopoOrder {
    let n = graph.node_count();
    let mut indeg = compute_in_degrees(graph);
    let mut frontier = seeds(&indeg);
    let mut order = Vec::with_capacity(n);
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &u in &frontier {
            for &v in graph.neighbor_span(u) {
                let d = &mut indeg[v as usize];
                *d -= 1;
                if *d == 0 {
                    next.push(v);
                }
            }
        }
        order.append(&mut frontier);
        next.sort_unstable();
        frontier = next;
    }
    TopoOrder::from_emitted(order, n)
}

#[cfg(feature = "rayon")]
fn levels_rayon<G: Graph + Sync + ?Sized>(graph: &G) -> TopoOrder {
    use rayon::prelude::*;

    let n = graph.node_count();
    let plain = compute_in_degrees(graph);
    let mut frontier = seeds(&plain);
    let counters: Vec<AtomicU32> = plain.into_iter().map(AtomicU32::new).collect();
    let indeg = &counters;
    let mut order = Vec::with_capacity(n);
    while !frontier.is_empty() {
        // exactly one decrement observes 1 -> 0, so each node is released once
        let mut next: Vec<NodeId> = frontier
            .par_iter()
            .flat_map_iter(move |&u| {
                graph
                    .neighbor_span(u)
                    .iter()
                    .copied()
                    .filter(move |&v| indeg[v as usize].fetch_sub(1, Ordering::AcqRel) == 1)
            })
            .collect();
        order.append(&mut frontier);
        next.par_sort_unstable();
        frontier = next;
    }
    TopoOrder::from_emitted(order, n)
}

/// Solver wrapper around [`parallel_kahn_toposort`].
#[derive(Debug)]
pub struct ParallelKahnSolver<'g, G: Graph + Sync + ?Sized> {
    graph: &'g G,
    config: ParallelConfig,
}

impl<'g, G: Graph + Sync + ?Sized> ParallelKahnSolver<'g, G> {
    pub fn new(graph: &'g G, config: ParallelConfig) -> Self {
        Self { graph, config }
    }
}

impl<G: Graph + Sync + ?Sized> TopoSolver for ParallelKahnSolver<'_, G> {
    fn name(&self) -> &'static str {
        "parallel_kahn"
    }

    fn run(&mut self) -> TopoOrder {
        parallel_kahn_toposort(self.graph, &self.config)
    }
}
