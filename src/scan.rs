use crate::errors::{GardenError, Result, UnresolvedReference};
use crate::graph::DependencyGraph;
use crate::resolver::absolute_path;
use crate::solver::{EdgeOutcome, Solver, Solvers};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Tally of one scan, mergeable across files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub statements: usize,
    pub edges_recorded: usize,
    #[serde(skip)]
    pub unresolved: Vec<UnresolvedReference>,
}

impl ScanReport {
    pub fn merge(mut self, other: ScanReport) -> Self {
        self.files_scanned += other.files_scanned;
        self.files_skipped += other.files_skipped;
        self.statements += other.statements;
        self.edges_recorded += other.edges_recorded;
        self.unresolved.extend(other.unresolved);
        self
    }

    fn skipped() -> Self {
        Self {
            files_skipped: 1,
            ..Self::default()
        }
    }
}

/// Run the statement extraction loop over the contents of one file.
///
/// Every line is tried against the solver's patterns; at most one statement
/// is recognized per line. A failing statement never stops the scan.
pub fn scan_source(
    solver: &dyn Solver,
    graph: &DependencyGraph,
    path: &Path,
    contents: &str,
) -> ScanReport {
    let file = absolute_path(path);
    let mut report = ScanReport {
        files_scanned: 1,
        ..ScanReport::default()
    };

    for (row, text) in contents.lines().enumerate() {
        let Some((index, token)) = solver.match_line(text) else {
            continue;
        };
        let line = row + 1;
        report.statements += 1;

        match solver.add_edge(graph, &file, token, index, line) {
            Ok(EdgeOutcome::Recorded(_)) => report.edges_recorded += 1,
            Ok(EdgeOutcome::Dropped(_)) => {}
            Ok(EdgeOutcome::Unresolved(reference)) => {
                tracing::warn!("{reference}");
                report.unresolved.push(reference);
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping statement at {}:{}: {}",
                    file.display(),
                    line,
                    e
                );
            }
        }
    }

    tracing::debug!(
        file = %file.display(),
        statements = report.statements,
        edges = report.edges_recorded,
        "scanned"
    );
    report
}

/// Read one file and scan it. Unreadable files are skipped with a warning.
pub fn scan_file(solver: &dyn Solver, graph: &DependencyGraph, path: &Path) -> ScanReport {
    match std::fs::read(path) {
        Ok(bytes) => scan_source(solver, graph, path, &String::from_utf8_lossy(&bytes)),
        Err(e) => {
            let err = GardenError::Read {
                path: path.to_path_buf(),
                source: e,
            };
            tracing::warn!("Skipping {}: {}", path.display(), err);
            ScanReport::skipped()
        }
    }
}

/// Scan an explicit list of files in parallel, routing each to its solver.
///
/// Files no solver handles are ignored. The worker count comes from
/// [`Solvers::jobs`]; only building the worker pool can fail.
pub fn scan_files(
    solvers: &Solvers,
    graph: &DependencyGraph,
    files: &[PathBuf],
) -> Result<ScanReport> {
    let run = || {
        files
            .par_iter()
            .filter_map(|path| solvers.solver_for(path).map(|solver| (solver, path)))
            .map(|(solver, path)| scan_file(solver, graph, path))
            .reduce(ScanReport::default, ScanReport::merge)
    };

    let report = match solvers.jobs() {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run),
        None => run(),
    };

    tracing::info!(
        files = report.files_scanned,
        skipped = report.files_skipped,
        edges = report.edges_recorded,
        unresolved = report.unresolved.len(),
        "scan complete"
    );
    Ok(report)
}
