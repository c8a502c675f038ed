use crate::errors::Result;
use crate::graph::DependencyGraph;
use crate::language::Language;
use crate::resolver::{absolute_path, PathResolver, SearchPathList};
use crate::solver::{record_edge, ResolutionPolicy, Solver, StatementPattern};
use regex::Regex;
use std::path::Path;

/// `require "x"`
pub const REQUIRE: usize = 0;
/// `require_relative "x"`
pub const REQUIRE_RELATIVE: usize = 1;

/// Solver for Ruby.
///
/// `require` is looked up in the load path only; `require_relative` only
/// next to the requiring file, whatever the load path says.
#[derive(Debug, Clone)]
pub struct RubySolver {
    patterns: Vec<StatementPattern>,
    file_pattern: Regex,
    resolver: PathResolver,
}

impl RubySolver {
    pub fn new(load_path: SearchPathList) -> Result<Self> {
        Ok(Self {
            patterns: vec![
                StatementPattern::new(
                    REQUIRE,
                    r#"^\s*require\s*\(?\s*['"]([^'"]+)['"]"#,
                    ResolutionPolicy::SearchOnly,
                )?,
                StatementPattern::new(
                    REQUIRE_RELATIVE,
                    r#"^\s*require_relative\s*\(?\s*['"]([^'"]+)['"]"#,
                    ResolutionPolicy::SourceOnly,
                )?,
            ],
            file_pattern: Regex::new(r"\.(rb|rake)$")?,
            resolver: PathResolver::new(load_path),
        })
    }
}

impl Solver for RubySolver {
    fn language(&self) -> Language {
        Language::Ruby
    }

    fn statement_patterns(&self) -> &[StatementPattern] {
        &self.patterns
    }

    fn file_pattern(&self) -> &Regex {
        &self.file_pattern
    }

    fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Feature names usually omit the extension: `require "foo"` loads `foo.rb`.
    fn destination_name(&self, statement: &str, _index: usize) -> String {
        let name = statement
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        if name.is_empty() || Path::new(&name).extension().is_some() {
            name
        } else {
            format!("{name}.rb")
        }
    }

    /// A file requiring itself is a no-op in Ruby, so no self-loop is recorded.
    fn insert_edge(
        &self,
        graph: &DependencyGraph,
        src_path: &Path,
        dst_path: &Path,
        name: &str,
        line: usize,
    ) -> Result<bool> {
        if absolute_path(src_path) == absolute_path(dst_path) {
            tracing::debug!(src = %src_path.display(), name, line, "self-require ignored");
            return Ok(false);
        }
        record_edge(graph, src_path, dst_path, name, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::EdgeOutcome;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn extracts_require() {
        let solver = RubySolver::new(SearchPathList::default()).unwrap();
        assert_eq!(solver.match_line("require \"foo/bar\""), Some((REQUIRE, "foo/bar")));
        assert_eq!(solver.match_line("  require('json')"), Some((REQUIRE, "json")));
    }

    #[test]
    fn extracts_require_relative() {
        let solver = RubySolver::new(SearchPathList::default()).unwrap();
        assert_eq!(
            solver.match_line("require_relative '../lib/helper'"),
            Some((REQUIRE_RELATIVE, "../lib/helper"))
        );
    }

    #[test]
    fn ignores_non_statements() {
        let solver = RubySolver::new(SearchPathList::default()).unwrap();
        assert_eq!(solver.match_line("# require 'foo'"), None);
        assert_eq!(solver.match_line("requirement = 'foo'"), None);
        assert_eq!(solver.match_line("require path"), None);
    }

    #[test]
    fn appends_rb_extension() {
        let solver = RubySolver::new(SearchPathList::default()).unwrap();
        assert_eq!(solver.destination_name("foo/bar", REQUIRE), "foo/bar.rb");
        assert_eq!(solver.destination_name("'baz.rb'", REQUIRE), "baz.rb");
        assert_eq!(solver.destination_name("ext.so", REQUIRE), "ext.so");
    }

    #[test]
    fn require_relative_ignores_load_path() {
        let tmp = TempDir::new().unwrap();
        let src = touch(tmp.path(), "app/main.rb");
        let local = touch(tmp.path(), "app/bar.rb");
        touch(tmp.path(), "lib/bar.rb");
        let solver = RubySolver::new(SearchPathList::new(vec![tmp.path().join("lib")])).unwrap();
        let graph = DependencyGraph::new();

        let outcome = solver
            .add_edge(&graph, &src, "bar", REQUIRE_RELATIVE, 5)
            .unwrap();
        assert_eq!(outcome, EdgeOutcome::Recorded(local));
    }

    #[test]
    fn require_ignores_source_directory() {
        let tmp = TempDir::new().unwrap();
        let src = touch(tmp.path(), "app/main.rb");
        touch(tmp.path(), "app/foo.rb");
        let solver = RubySolver::new(SearchPathList::new(vec![tmp.path().join("lib")])).unwrap();
        let graph = DependencyGraph::new();

        let outcome = solver.add_edge(&graph, &src, "foo", REQUIRE, 3).unwrap();
        assert!(matches!(outcome, EdgeOutcome::Unresolved(ref r) if r.name == "foo.rb"));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn self_require_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let src = touch(tmp.path(), "app/main.rb");
        let solver = RubySolver::new(SearchPathList::default()).unwrap();
        let graph = DependencyGraph::new();

        let outcome = solver
            .add_edge(&graph, &src, "./main", REQUIRE_RELATIVE, 1)
            .unwrap();
        assert_eq!(outcome, EdgeOutcome::Dropped(src));
        assert_eq!(graph.node_count(), 0);
    }
}
