use crate::errors::Result;
use crate::language::Language;
use crate::resolver::{PathResolver, SearchPathList};
use crate::solver::{ResolutionPolicy, Solver, StatementPattern};
use regex::Regex;

/// `#include "x"` / `#import "x"`
pub const QUOTED: usize = 0;
/// `#include <x>` / `#import <x>`
pub const ANGLED: usize = 1;

/// Solver for C, C++, Objective-C and their headers.
///
/// Quoted includes are looked up next to the including file first, angled
/// includes only in the include paths.
#[derive(Debug, Clone)]
pub struct CSolver {
    patterns: Vec<StatementPattern>,
    file_pattern: Regex,
    resolver: PathResolver,
}

impl CSolver {
    pub fn new(include_paths: SearchPathList) -> Result<Self> {
        Ok(Self {
            patterns: vec![
                StatementPattern::new(
                    QUOTED,
                    r#"^\s*#\s*(?:include|import)\s*"([^"]+)""#,
                    ResolutionPolicy::SourceThenSearch,
                )?,
                StatementPattern::new(
                    ANGLED,
                    r"^\s*#\s*(?:include|import)\s*<([^>]+)>",
                    ResolutionPolicy::SearchOnly,
                )?,
            ],
            file_pattern: Regex::new(r"\.(c|h|cc|hh|cpp|hpp|cxx|hxx|c\+\+|h\+\+|inl|m|mm)$")?,
            resolver: PathResolver::new(include_paths),
        })
    }
}

impl Solver for CSolver {
    fn language(&self) -> Language {
        Language::C
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
}
