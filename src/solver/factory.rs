use crate::config::Config;
use crate::errors::Result;
use crate::language::Language;
use crate::solver::{CSolver, RubySolver, Solver};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Create the solver for a given language and config.
pub fn create_solver(lang: Language, config: &Config, base_dir: &Path) -> Result<Box<dyn Solver>> {
    let search_paths = config.search_paths(lang, base_dir)?;
    Ok(match lang {
        Language::C => Box::new(CSolver::new(search_paths)?),
        Language::Ruby => Box::new(RubySolver::new(search_paths)?),
    })
}

/// The solvers of one run, and the routing of files to them.
pub struct Solvers {
    solvers: Vec<Box<dyn Solver>>,
    exclude: Option<GlobSet>,
    base_dir: PathBuf,
    jobs: Option<usize>,
}

impl Solvers {
    pub fn new(solvers: Vec<Box<dyn Solver>>) -> Self {
        Self {
            solvers,
            exclude: None,
            base_dir: PathBuf::new(),
            jobs: None,
        }
    }

    /// One solver per supported language, configured from `config`.
    ///
    /// Relative search paths and exclude patterns are taken relative to `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self> {
        let solvers = Language::ALL
            .iter()
            .map(|&lang| create_solver(lang, config, base_dir))
            .collect::<Result<Vec<_>>>()?;
        let mut set = Self::new(solvers).with_exclude(&config.exclude)?;
        set.base_dir = base_dir.to_path_buf();
        set.jobs = config.jobs;
        Ok(set)
    }

    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            self.exclude = None;
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.exclude = Some(builder.build()?);
        Ok(self)
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn jobs(&self) -> Option<usize> {
        self.jobs
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Solver> {
        self.solvers.iter().map(|solver| solver.as_ref())
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        exclude.is_match(relative)
            || exclude.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| exclude.is_match(Path::new(name)))
    }

    /// The solver for `path`: the first whose file pattern matches the file
    /// name, unless the path is excluded.
    pub fn solver_for(&self, path: &Path) -> Option<&dyn Solver> {
        if self.is_excluded(path) {
            tracing::debug!(path = %path.display(), "excluded");
            return None;
        }
        self.iter().find(|solver| solver.handles(path))
    }
}
