//! # depgarden
//!
//! File-level dependency graph extraction. Each language plugs in a
//! [`Solver`](solver::Solver) that recognizes its statements (`#include`,
//! `require`, ...) line by line and resolves them to files; every solver feeds
//! one shared, thread-safe [`DependencyGraph`](graph::DependencyGraph).
//!
//! ## Supported Languages
//!
//! C/C++/Objective-C, Ruby

pub mod config;
pub mod errors;
pub mod graph;
pub mod language;
pub mod resolver;
pub mod scan;
pub mod solver;

pub use config::Config;
pub use errors::{GardenError, Result, UnresolvedReference};
pub use graph::{DependencyGraph, EdgeRecord};
pub use language::Language;
pub use resolver::{PathResolver, SearchPathList};
pub use scan::{scan_file, scan_files, scan_source, ScanReport};
pub use solver::{EdgeOutcome, ResolutionPolicy, Solver, Solvers, StatementPattern};
