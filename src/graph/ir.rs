use petgraph::graph::DiGraph;
use serde::Serialize;
use std::path::PathBuf;

/// Unique identifier for a graph node
pub type NodeId = petgraph::graph::NodeIndex;

/// The dependency graph: one node per file, one edge per (includer, included) pair.
pub type DepGraph = DiGraph<GraphNode, GraphEdge>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphNode {
    /// Normalized file path; the identity of the node
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GraphEdge {
    /// Line numbers (1-indexed) of every statement that produced this edge, in insertion order
    pub lines: Vec<usize>,
    /// Number of detections folded into this edge
    pub weight: usize,
}

/// Flattened view of one edge, handed to downstream consumers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    pub lines: Vec<usize>,
    pub count: usize,
}
