pub mod builder;
pub mod ir;

pub use builder::DependencyGraph;
pub use ir::{DepGraph, EdgeRecord, GraphEdge, GraphNode, NodeId};
