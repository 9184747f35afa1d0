mod util;
use util::*;

use csr_toposort::debug_invariants::DebugInvariants;
use csr_toposort::graph::{CompressedGraph, FrozenCsr, Graph, NodeId};
use csr_toposort::graph_error::GraphError;

#[test]
fn csr_matches_sorted_adjacency() {
    let g = CompressedGraph::from_adj(&[vec![2, 1], vec![2, 2], vec![]]).unwrap();
    let csr = g.csr();
    assert_eq!(&*csr.offsets, &[0, 2, 3, 3]);
    assert_eq!(&*csr.neighbors, &[1, 2, 2]);
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.in_degrees(), &[0, 1, 2]);
}

#[test]
fn csr_stays_consistent_under_insertions() {
    let mut g = CompressedGraph::with_nodes(50);
    for (u, v) in random_digraph(50, 400, 7) {
        g.add_edge(u, v).unwrap();
        if u % 7 == 0 {
            // read in between so some views get rebuilt mid-stream
            let _ = g.neighbor_span(u);
        }
    }
    let csr = g.csr();
    assert!(csr.offsets.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(csr.offsets[50] as usize, g.edge_count());
    for u in 0..50 {
        let run = g.neighbor_span(u);
        assert!(run.windows(2).all(|w| w[0] < w[1]), "run of {u} not strictly ascending");
        assert_eq!(run, g.successors(u));
    }
    g.build_varint();
    assert!(g.validate_invariants().is_ok());
}

#[test]
fn varint_decodes_to_csr_runs() {
    let g = graph_from(200, &random_dag(200, 2_000, 11));
    for u in 0..200 {
        let decoded: Vec<NodeId> = g.varint_neighbors(u).collect();
        assert_eq!(decoded, g.neighbor_span(u));
    }
    let fp = g.memory_footprint();
    assert!(fp.varint_bytes > 0);
}

#[test]
fn varint_run_of_middle_node() {
    // node 2 has run [3, 4]: absolute 3, then delta 1
    let g = CompressedGraph::from_adj(&[vec![2], vec![2], vec![3, 4], vec![], vec![]]).unwrap();
    let view = g.build_varint();
    assert_eq!(view.run_bytes(2), &[3, 1]);
    assert_eq!(g.varint_neighbors(2).collect::<Vec<_>>(), vec![3, 4]);
    let mut seen = Vec::new();
    g.for_each_neighbor_varint(2, |v| seen.push(v));
    assert_eq!(seen, vec![3, 4]);
}

#[test]
fn bulk_loads_validate_before_commit() {
    let mut g = chain(3);
    let generation = g.generation();
    assert_eq!(
        g.build_from_edges(3, &[(0, 1), (1, 3)]),
        Err(GraphError::NodeOutOfRange { node: 3, node_count: 3 })
    );
    assert_eq!(
        g.build_from_adj(&[vec![1u32], vec![9]]),
        Err(GraphError::NodeOutOfRange { node: 9, node_count: 2 })
    );
    assert_eq!(g.generation(), generation);
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.neighbor_span(1), &[2]);
}

#[test]
fn checked_lookups_reject_unknown_ids() {
    let mut g = chain(2);
    assert_eq!(g.try_neighbor_span(0), Ok(&[1][..]));
    assert!(matches!(
        g.try_neighbor_span(2),
        Err(GraphError::NodeOutOfRange { node: 2, node_count: 2 })
    ));
    assert!(g.neighbor_span(2).is_empty());
    assert!(matches!(
        g.add_edge(0, 5),
        Err(GraphError::NodeOutOfRange { node: 5, .. })
    ));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn exported_snapshot_outlives_mutation() {
    let mut g = chain(3);
    let snap: FrozenCsr = g.export_csr();
    g.add_edge(0, 2).unwrap();
    assert_eq!(snap.neighbor_span(0), &[1]);
    assert_eq!(g.neighbor_span(0), &[1, 2]);
    assert!(snap.generation < g.csr().generation);
    let (offsets, neighbors) = snap.into_parts();
    assert_eq!(offsets, vec![0, 1, 2, 2]);
    assert_eq!(neighbors, vec![1, 2]);
}

#[test]
fn concurrent_first_readers_share_one_view() {
    let g = graph_from(500, &random_dag(500, 3_000, 3));
    let ptrs: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| g.csr().neighbors.as_ptr() as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn adjacency_lists_implement_the_graph_contract() {
    let adj: Vec<Vec<NodeId>> = vec![vec![1, 2], vec![2], vec![]];
    assert_eq!(adj.node_count(), 3);
    assert_eq!(adj.edge_count(), 3);
    assert_eq!(adj.out_degree(0), 2);
    let mut seen = Vec::new();
    adj.for_each_neighbor(0, |v| seen.push(v));
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn malformed_csr_is_rejected_on_load() {
    let bad = r#"{"offsets":[0,5],"neighbors":[],"generation":0}"#;
    assert!(serde_json::from_str::<FrozenCsr>(bad).is_err());

    // a genuine export survives the trip and is still sortable
    let g = chain(4);
    let json = serde_json::to_string(&g.export_csr()).unwrap();
    let back: FrozenCsr = serde_json::from_str(&json).unwrap();
    let out = csr_toposort::algs::kahn_toposort(&back);
    assert_eq!(out.order, vec![0, 1, 2, 3]);
}

#[test]
fn unchecked_adjacency_goes_through_from_adj() {
    let parsed: Vec<Vec<NodeId>> = vec![vec![1], vec![7]];
    assert_eq!(
        CompressedGraph::from_adj(&parsed).err(),
        Some(GraphError::NodeOutOfRange { node: 7, node_count: 2 })
    );
}
