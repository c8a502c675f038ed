use crate::errors::{GardenError, Result};
use crate::graph::ir::{DepGraph, EdgeRecord, GraphEdge, GraphNode, NodeId};
use crate::resolver::normalize_path;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Node arena plus the path index that keeps node identity unique.
#[derive(Debug, Default)]
struct GraphState {
    graph: DepGraph,
    node_map: HashMap<PathBuf, NodeId>,
}

impl GraphState {
    /// Get or create a node for the given path.
    fn ensure_node(&mut self, path: PathBuf) -> NodeId {
        if let Some(&idx) = self.node_map.get(&path) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode { path: path.clone() });
        self.node_map.insert(path, idx);
        idx
    }

    fn record(&self, edge: petgraph::graph::EdgeReference<'_, GraphEdge>) -> EdgeRecord {
        let weight = edge.weight();
        EdgeRecord {
            from: self.graph[edge.source()].path.clone(),
            to: self.graph[edge.target()].path.clone(),
            lines: weight.lines.clone(),
            count: weight.weight,
        }
    }
}

/// Shared dependency graph, filled concurrently by scanning workers.
///
/// Every mutation happens under one lock, so an `add_edge` call is atomic:
/// either both vertices and the line record land, or nothing does.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    state: Mutex<GraphState>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, GraphState> {
        // No insertion leaves the state half-written, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that `src` depends on `dst`, detected at `line`.
    ///
    /// Creates both vertices and the edge on first sight; afterwards the line
    /// is appended to the existing edge and its count goes up by one.
    pub fn add_edge(&self, src: &Path, dst: &Path, line: usize) -> Result<()> {
        if src.as_os_str().is_empty() {
            return Err(GardenError::InvalidArgument(
                "edge source path is empty".to_string(),
            ));
        }
        if dst.as_os_str().is_empty() {
            return Err(GardenError::InvalidArgument(format!(
                "edge destination path is empty (source {})",
                src.display()
            )));
        }

        let src = normalize_path(src);
        let dst = normalize_path(dst);

        let mut state = self.state();
        let source_idx = state.ensure_node(src);
        let target_idx = state.ensure_node(dst);

        if let Some(edge_idx) = state.graph.find_edge(source_idx, target_idx) {
            let edge = &mut state.graph[edge_idx];
            edge.lines.push(line);
            edge.weight += 1;
        } else {
            state.graph.add_edge(
                source_idx,
                target_idx,
                GraphEdge {
                    lines: vec![line],
                    weight: 1,
                },
            );
        }
        Ok(())
    }

    /// All vertex paths, in creation order.
    pub fn vertices(&self) -> Vec<PathBuf> {
        self.state()
            .graph
            .node_weights()
            .map(|node| node.path.clone())
            .collect()
    }

    /// All edges, in creation order.
    pub fn edges(&self) -> Vec<EdgeRecord> {
        let state = self.state();
        state
            .graph
            .edge_references()
            .map(|edge| state.record(edge))
            .collect()
    }

    /// Look up the edge between two paths, if one was recorded.
    pub fn edge(&self, src: &Path, dst: &Path) -> Option<EdgeRecord> {
        let state = self.state();
        let source_idx = *state.node_map.get(&normalize_path(src))?;
        let target_idx = *state.node_map.get(&normalize_path(dst))?;
        let edge_idx = state.graph.find_edge(source_idx, target_idx)?;
        let (source, target) = state.graph.edge_endpoints(edge_idx)?;
        let weight = &state.graph[edge_idx];
        Some(EdgeRecord {
            from: state.graph[source].path.clone(),
            to: state.graph[target].path.clone(),
            lines: weight.lines.clone(),
            count: weight.weight,
        })
    }

    pub fn node_count(&self) -> usize {
        self.state().graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.state().graph.edge_count()
    }

    /// Copy of the current graph for read-only consumers.
    pub fn snapshot(&self) -> DepGraph {
        self.state().graph.clone()
    }

    /// Consume the shared graph once scanning is done.
    pub fn into_graph(self) -> DepGraph {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .graph
    }
}
