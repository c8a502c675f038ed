use std::path::{Component, Path, PathBuf};

/// Ordered directories consulted when a statement is not found next to its
/// source file. The first directory holding the file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPathList {
    dirs: Vec<PathBuf>,
}

impl SearchPathList {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl FromIterator<PathBuf> for SearchPathList {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns the token of a matched statement into the file it refers to.
///
/// Lookups hit the filesystem every time; nothing is cached, so the answer
/// only depends on the arguments, the search paths and what is on disk.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    search_paths: SearchPathList,
}

impl PathResolver {
    pub fn new(search_paths: SearchPathList) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &SearchPathList {
        &self.search_paths
    }

    /// Full lookup: an absolute token stands alone, otherwise the directory
    /// of `source_file` is tried before the search paths.
    pub fn resolve(&self, source_file: &Path, token: &str) -> Option<PathBuf> {
        let path = Path::new(token);
        if path.is_absolute() {
            return existing_file(path);
        }
        self.resolve_relative(source_file, token)
            .or_else(|| self.resolve_in_search_paths(token))
    }

    /// Lookup relative to the directory of `source_file` only.
    pub fn resolve_relative(&self, source_file: &Path, token: &str) -> Option<PathBuf> {
        let path = Path::new(token);
        if path.is_absolute() {
            return existing_file(path);
        }
        existing_file(&source_file.parent()?.join(path))
    }

    /// Lookup in the search paths only, in order.
    pub fn resolve_in_search_paths(&self, token: &str) -> Option<PathBuf> {
        let path = Path::new(token);
        if path.is_absolute() {
            return existing_file(path);
        }
        self.search_paths
            .iter()
            .find_map(|dir| existing_file(&dir.join(path)))
    }
}

/// Absolute, normalized `candidate` if it names a regular file.
///
/// A failing stat (missing file, permission denied, ...) counts as not found.
fn existing_file(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        tracing::trace!(candidate = %candidate.display(), "found");
        Some(absolute_path(candidate))
    } else {
        tracing::trace!(candidate = %candidate.display(), "not found");
        None
    }
}

/// Absolute form of `path` (joined to the working directory when relative),
/// normalized. This is the identity of a file in the graph.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .map(|abs| normalize_path(&abs))
        .unwrap_or_else(|_| normalize_path(path))
}

/// Lexical path normalization: drops `.` components and folds `..` into
/// their parent. Symlinks are left alone.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}
