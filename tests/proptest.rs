use depgarden::DependencyGraph;
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn file(i: usize) -> PathBuf {
    PathBuf::from(format!("/proj/file_{i}.h"))
}

proptest! {
    #[test]
    fn lines_accumulate_in_insertion_order(lines in prop::collection::vec(1usize..10_000, 1..50)) {
        let graph = DependencyGraph::new();
        for &line in &lines {
            graph.add_edge(Path::new("/proj/a.c"), Path::new("/proj/b.h"), line).unwrap();
        }
        let edges = graph.edges();
        prop_assert_eq!(edges.len(), 1);
        prop_assert_eq!(&edges[0].lines, &lines);
        prop_assert_eq!(edges[0].count, lines.len());
    }

    #[test]
    fn one_vertex_per_path_one_edge_per_pair(
        edges in prop::collection::vec((0usize..20, 0usize..20, 1usize..500), 0..200)
    ) {
        let graph = DependencyGraph::new();
        for &(from, to, line) in &edges {
            graph.add_edge(&file(from), &file(to), line).unwrap();
        }

        let paths: HashSet<PathBuf> = edges
            .iter()
            .flat_map(|&(from, to, _)| [file(from), file(to)])
            .collect();
        let vertices = graph.vertices();
        prop_assert_eq!(vertices.len(), paths.len());
        prop_assert_eq!(vertices.into_iter().collect::<HashSet<_>>(), paths);

        let pairs: HashSet<(usize, usize)> = edges.iter().map(|&(f, t, _)| (f, t)).collect();
        prop_assert_eq!(graph.edge_count(), pairs.len());

        let total: usize = graph.edges().iter().map(|e| e.count).sum();
        prop_assert_eq!(total, edges.len());
    }

    #[test]
    fn concurrent_inserts_lose_nothing(
        threads in 2usize..8,
        per_thread in 1usize..40,
        pairs in 1usize..4,
    ) {
        let graph = Arc::new(DependencyGraph::new());
        std::thread::scope(|scope| {
            for t in 0..threads {
                let graph = Arc::clone(&graph);
                scope.spawn(move || {
                    for i in 0..per_thread {
                        let line = t * per_thread + i;
                        let dst = file(line % pairs);
                        graph.add_edge(Path::new("/proj/main.c"), &dst, line).unwrap();
                    }
                });
            }
        });

        let expected_edges = pairs.min(threads * per_thread);
        prop_assert_eq!(graph.edge_count(), expected_edges);
        prop_assert_eq!(graph.node_count(), expected_edges + 1);

        let mut lines: Vec<usize> = graph.edges().into_iter().flat_map(|e| e.lines).collect();
        lines.sort_unstable();
        prop_assert_eq!(lines, (0..threads * per_thread).collect::<Vec<_>>());
    }
}
