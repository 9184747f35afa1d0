#![allow(dead_code)]
use csr_toposort::graph::{CompressedGraph, Graph, NodeId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Assert vec is a permutation of `0..n` (order-agnostic).
pub fn assert_permutation(order: &[NodeId], n: usize) {
    let mut a = order.to_vec();
    a.sort_unstable();
    let want: Vec<NodeId> = (0..n as NodeId).collect();
    assert_eq!(a, want, "not a permutation of 0..{n}\n got={:?}", order);
}

/// Assert `order` is a topological order of `g`: a permutation in which
/// every edge points forward.
pub fn assert_topological<G: Graph + ?Sized>(g: &G, order: &[NodeId]) {
    let n = g.node_count();
    assert_permutation(order, n);
    let mut pos = vec![0usize; n];
    for (i, &v) in order.iter().enumerate() {
        pos[v as usize] = i;
    }
    for u in 0..n as NodeId {
        for &v in g.neighbor_span(u) {
            assert!(
                pos[u as usize] < pos[v as usize],
                "edge {u} -> {v} points backwards in {:?}",
                order
            );
        }
    }
}

/// Random DAG: edges only go from a lower to a higher rank of a shuffled
/// labelling, so ids alone don't reveal the order.
pub fn random_dag(n: usize, edges: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut label: Vec<NodeId> = (0..n as NodeId).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        label.swap(i, j);
    }
    let mut out = Vec::with_capacity(edges);
    if n < 2 {
        return out;
    }
    for _ in 0..edges {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        out.push((label[lo], label[hi]));
    }
    out
}

/// Arbitrary directed edges (cycles likely).
pub fn random_digraph(n: usize, edges: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..edges)
        .map(|_| {
            (
                rng.gen_range(0..n) as NodeId,
                rng.gen_range(0..n) as NodeId,
            )
        })
        .collect()
}

/// Store from an edge list.
pub fn graph_from(n: usize, edges: &[(NodeId, NodeId)]) -> CompressedGraph {
    CompressedGraph::from_edges(n, edges).unwrap()
}

/// 0 -> 1 -> ... -> n-1
pub fn chain(n: usize) -> CompressedGraph {
    let edges: Vec<(NodeId, NodeId)> = (1..n as NodeId).map(|i| (i - 1, i)).collect();
    graph_from(n, &edges)
}
