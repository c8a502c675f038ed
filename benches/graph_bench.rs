use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depgarden::solver::CSolver;
use depgarden::{scan_source, DependencyGraph, SearchPathList};
use std::path::PathBuf;

fn paths(n: usize) -> Vec<PathBuf> {
    (0..n)
        .map(|i| PathBuf::from(format!("/proj/src/mod_{i}.h")))
        .collect()
}

fn bench_dense_inserts(c: &mut Criterion) {
    let files = paths(100);
    c.bench_function("dense_graph_100_inserts", |b| {
        b.iter(|| {
            let graph = DependencyGraph::new();
            for (i, src) in files.iter().enumerate() {
                for (j, dst) in files.iter().enumerate() {
                    if i != j {
                        graph.add_edge(src, dst, j + 1).unwrap();
                    }
                }
            }
            black_box(graph.edge_count())
        })
    });
}

fn bench_repeated_pair(c: &mut Criterion) {
    c.bench_function("repeated_pair_10k_lines", |b| {
        let src = PathBuf::from("/proj/src/main.c");
        let dst = PathBuf::from("/proj/include/util.h");
        b.iter(|| {
            let graph = DependencyGraph::new();
            for line in 0..10_000 {
                graph.add_edge(&src, &dst, line).unwrap();
            }
            black_box(graph.edges())
        })
    });
}

fn bench_scan_source(c: &mut Criterion) {
    let tmp = tempfile::TempDir::new().unwrap();
    let include = tmp.path().join("include");
    std::fs::create_dir_all(&include).unwrap();
    let mut source = String::new();
    for i in 0..200 {
        std::fs::write(include.join(format!("h_{i}.h")), "").unwrap();
        source.push_str(&format!("#include <h_{i}.h>\nstatic int v_{i} = {i};\n"));
    }
    let solver = CSolver::new(SearchPathList::new(vec![include])).unwrap();
    let main = tmp.path().join("main.c");

    c.bench_function("scan_source_200_includes", |b| {
        b.iter(|| {
            let graph = DependencyGraph::new();
            black_box(scan_source(&solver, &graph, &main, &source))
        })
    });
}

criterion_group!(
    benches,
    bench_dense_inserts,
    bench_repeated_pair,
    bench_scan_source
);
criterion_main!(benches);
