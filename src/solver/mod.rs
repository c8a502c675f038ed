pub mod c;
pub mod factory;
pub mod ruby;

pub use c::CSolver;
pub use factory::Solvers;
pub use ruby::RubySolver;

use crate::errors::{GardenError, Result, UnresolvedReference};
use crate::graph::DependencyGraph;
use crate::language::Language;
use crate::resolver::PathResolver;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Where a matched token is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Next to the source file first, then the search paths (`#include "x"`).
    SourceThenSearch,
    /// Next to the source file only (`require_relative`).
    SourceOnly,
    /// Search paths only (`#include <x>`, `require`).
    SearchOnly,
}

/// One statement syntax of a language.
///
/// The regex must have a capture group 1 holding the destination token.
#[derive(Debug, Clone)]
pub struct StatementPattern {
    pub index: usize,
    pub regex: Regex,
    pub policy: ResolutionPolicy,
}

impl StatementPattern {
    pub fn new(index: usize, pattern: &str, policy: ResolutionPolicy) -> Result<Self> {
        Ok(Self {
            index,
            regex: Regex::new(pattern)?,
            policy,
        })
    }
}

/// What became of a matched statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// An edge to this destination was recorded.
    Recorded(PathBuf),
    /// The destination resolved but the solver chose not to record it.
    Dropped(PathBuf),
    /// No file was found for the statement.
    Unresolved(UnresolvedReference),
}

/// Per-language statement solver.
///
/// A solver knows which files it handles, how its statements look, and how a
/// statement turns into an edge. It holds no state besides its search paths;
/// everything it learns goes into the shared [`DependencyGraph`].
pub trait Solver: Send + Sync {
    fn language(&self) -> Language;

    /// Statement patterns, ordered by index.
    fn statement_patterns(&self) -> &[StatementPattern];

    /// Pattern on file names selecting the files of this language.
    fn file_pattern(&self) -> &Regex;

    fn resolver(&self) -> &PathResolver;

    fn handles(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.file_pattern().is_match(name))
    }

    /// Try the statement patterns on one line, in index order; first match wins.
    fn match_line<'l>(&self, line: &'l str) -> Option<(usize, &'l str)> {
        self.statement_patterns().iter().find_map(|pattern| {
            pattern
                .regex
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|token| (pattern.index, token.as_str()))
        })
    }

    /// The destination name written in `statement`, without delimiters.
    fn destination_name(&self, statement: &str, _index: usize) -> String {
        statement
            .trim()
            .trim_matches(|c| matches!(c, '"' | '\'' | '<' | '>'))
            .to_string()
    }

    /// Look `name` up according to the policy of pattern `index`.
    fn resolve(&self, src_path: &Path, name: &str, index: usize) -> Result<Option<PathBuf>> {
        let pattern = self
            .statement_patterns()
            .iter()
            .find(|p| p.index == index)
            .ok_or_else(|| {
                GardenError::InvalidArgument(format!(
                    "{} solver has no statement pattern {index}",
                    self.language()
                ))
            })?;
        let resolver = self.resolver();
        Ok(match pattern.policy {
            ResolutionPolicy::SourceThenSearch => resolver.resolve(src_path, name),
            ResolutionPolicy::SourceOnly => resolver.resolve_relative(src_path, name),
            ResolutionPolicy::SearchOnly => resolver.resolve_in_search_paths(name),
        })
    }

    /// Entry point for every statement match: resolve, then hand over to
    /// [`Solver::insert_edge`].
    fn add_edge(
        &self,
        graph: &DependencyGraph,
        src_path: &Path,
        statement: &str,
        index: usize,
        line: usize,
    ) -> Result<EdgeOutcome> {
        let name = self.destination_name(statement, index);
        if name.is_empty() {
            return Err(GardenError::InvalidArgument(format!(
                "empty statement in {}:{line}",
                src_path.display()
            )));
        }

        let Some(dst_path) = self.resolve(src_path, &name, index)? else {
            return Ok(EdgeOutcome::Unresolved(UnresolvedReference {
                file: src_path.to_path_buf(),
                line,
                name,
            }));
        };

        if self.insert_edge(graph, src_path, &dst_path, &name, line)? {
            Ok(EdgeOutcome::Recorded(dst_path))
        } else {
            Ok(EdgeOutcome::Dropped(dst_path))
        }
    }

    /// Record a resolved statement. Returns whether an edge was recorded.
    fn insert_edge(
        &self,
        graph: &DependencyGraph,
        src_path: &Path,
        dst_path: &Path,
        name: &str,
        line: usize,
    ) -> Result<bool> {
        record_edge(graph, src_path, dst_path, name, line)
    }
}

/// Plain insertion shared by every solver's `insert_edge`.
pub fn record_edge(
    graph: &DependencyGraph,
    src_path: &Path,
    dst_path: &Path,
    name: &str,
    line: usize,
) -> Result<bool> {
    tracing::debug!(
        src = %src_path.display(),
        dst = %dst_path.display(),
        name,
        line,
        "edge"
    );
    graph.add_edge(src_path, dst_path, line)?;
    Ok(true)
}
