use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use csr_toposort::algs::{
    IncrementalTopoSolver, ParallelConfig, TieBreak, dfs_toposort, kahn_toposort,
    lexicographic_toposort, parallel_kahn_toposort,
};
use csr_toposort::graph::{CompressedGraph, InvalidateCache, NodeId};

/// Random DAG with edges from lower to higher id.
fn random_dag_edges(n: usize, edges: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..edges)
        .filter_map(|_| {
            let a = rng.gen_range(0..n as NodeId);
            let b = rng.gen_range(0..n as NodeId);
            (a != b).then(|| (a.min(b), a.max(b)))
        })
        .collect()
}

fn bench_batch_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_solvers");

    for &n in &[10_000usize, 100_000usize] {
        let g = CompressedGraph::from_edges(n, &random_dag_edges(n, n * 4, 1)).unwrap();
        let _ = g.csr();

        group.bench_with_input(BenchmarkId::new("dfs", n), &n, |b, _| {
            b.iter(|| black_box(dfs_toposort(&g)));
        });
        group.bench_with_input(BenchmarkId::new("kahn", n), &n, |b, _| {
            b.iter(|| black_box(kahn_toposort(&g)));
        });
        group.bench_with_input(BenchmarkId::new("lexi_min", n), &n, |b, _| {
            b.iter(|| black_box(lexicographic_toposort(&g, TieBreak::MinFirst)));
        });
        group.bench_with_input(BenchmarkId::new("parallel_kahn", n), &n, |b, _| {
            let cfg = ParallelConfig::default();
            b.iter(|| black_box(parallel_kahn_toposort(&g, &cfg)));
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");
    let n = 50_000usize;
    let edges = random_dag_edges(n, n * 4, 2);

    group.bench_function("csr_rebuild", |b| {
        let mut g = CompressedGraph::from_edges(n, &edges).unwrap();
        b.iter(|| {
            g.invalidate_cache();
            black_box(g.csr().neighbors.len());
        });
    });

    group.bench_function("varint_scan", |b| {
        let g = CompressedGraph::from_edges(n, &edges).unwrap();
        g.build_varint();
        b.iter(|| {
            let mut sum = 0u64;
            for u in 0..n as NodeId {
                g.for_each_neighbor_varint(u, |v| sum += u64::from(v));
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental");
    let n = 5_000usize;
    let edges = random_dag_edges(n, n * 3, 3);
    // insert in reverse id order so most insertions take the slow path
    let mut inserts = edges.clone();
    inserts.sort_unstable_by(|a, b| b.cmp(a));

    group.bench_function("insert_dag_edges", |b| {
        b.iter(|| {
            let mut g = CompressedGraph::with_nodes(n);
            let mut inc = IncrementalTopoSolver::new(&mut g);
            for &(u, v) in &inserts {
                black_box(inc.add_edge(u, v).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_batch_solvers, bench_views, bench_incremental);
criterion_main!(benches);
