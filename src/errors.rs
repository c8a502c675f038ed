use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GardenError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(depgarden::invalid_argument))]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(depgarden::config))]
    Config(String),

    #[error("Could not read {path}: {source}")]
    #[diagnostic(code(depgarden::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(depgarden::pattern))]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    #[diagnostic(code(depgarden::glob))]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    #[diagnostic(code(depgarden::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, GardenError>;

/// A matched statement whose target could not be found on disk.
///
/// Not an error: the scan keeps going and the reference is reported
/// alongside the finished graph.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Unresolved reference '{name}' in {path}:{line}", path = .file.display())]
#[diagnostic(code(depgarden::unresolved), severity(Warning))]
pub struct UnresolvedReference {
    pub file: PathBuf,
    pub line: usize,
    pub name: String,
}
