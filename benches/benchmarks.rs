//! Criterion benchmarks for graph-searcher.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use graph_searcher::discovery::{AdjacencyMatrix, FileSearcher, MatrixSearcher};

/// Random matrix with roughly `edges_per_node` outgoing edges per node.
fn make_random_matrix(node_count: usize, edges_per_node: usize) -> AdjacencyMatrix {
    let mut rng = rand::thread_rng();
    let labels: Vec<String> = (0..node_count).map(|i| format!("n{}", i)).collect();
    let mut cells = vec![vec![false; node_count]; node_count];
    for row in cells.iter_mut() {
        for _ in 0..edges_per_node {
            row[rng.gen_range(0..node_count)] = true;
        }
    }
    // Chain every node so the whole matrix is reachable from n0.
    for i in 0..node_count - 1 {
        cells[i][i + 1] = true;
    }
    AdjacencyMatrix::new(labels, cells).expect("square matrix")
}

fn bench_matrix_dfs(c: &mut Criterion) {
    let mut searcher = MatrixSearcher::from_matrix(make_random_matrix(500, 8));
    c.bench_function("matrix_dfs_500", |b| {
        b.iter(|| searcher.dfs_search("n0".to_string()).unwrap())
    });
}

fn bench_matrix_bfs(c: &mut Criterion) {
    let mut searcher = MatrixSearcher::from_matrix(make_random_matrix(500, 8));
    c.bench_function("matrix_bfs_500", |b| {
        b.iter(|| searcher.bfs_search("n0".to_string()).unwrap())
    });
}

fn bench_file_chain(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let count = 200;
    for i in 0..count {
        let content = if i + 1 < count {
            format!("{}\n{}", i % 10, i + 1)
        } else {
            format!("{}", i % 10)
        };
        std::fs::write(dir.path().join(i.to_string()), content).unwrap();
    }

    let mut searcher = FileSearcher::with_base(dir.path());
    c.bench_function("file_chain_dfs_200", |b| {
        b.iter(|| {
            searcher.dfs_search("0".to_string()).unwrap();
            searcher.concat_order()
        })
    });
}

criterion_group!(benches, bench_matrix_dfs, bench_matrix_bfs, bench_file_chain);
criterion_main!(benches);
