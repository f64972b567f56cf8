//! The set of source files in the current analysis scope.

use crate::core::FileHandle;
use crate::report::FileResolver;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Source files keyed by project-relative path with `/` separators.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    root: PathBuf,
    files: BTreeMap<String, FileHandle>,
}

impl ProjectFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn from_paths(root: impl Into<PathBuf>, paths: &[PathBuf]) -> Self {
        let mut files = Self::new(root);
        for path in paths {
            files.insert(path);
        }
        files
    }

    /// Register a file given either relative to the root or as a path under it.
    pub fn insert(&mut self, path: &Path) -> FileHandle {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let key = to_key(relative);
        let handle = FileHandle::new(PathBuf::from(&key));
        self.files.insert(key, handle.clone());
        handle
    }

    pub fn handle_for(&self, path: &Path) -> Option<FileHandle> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.files.get(&to_key(relative)).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn key_for_reported(&self, reported: &str) -> String {
        let normalized = reported.trim().replace('\\', "/");
        let path = Path::new(&normalized);
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        to_key(relative)
    }
}

impl FileResolver for ProjectFiles {
    fn resolve_file(&self, path: &str) -> Option<FileHandle> {
        self.files.get(&self.key_for_reported(path)).cloned()
    }
}

/// Join normal components with `/`, dropping `.` segments and folding `..`
/// into the segment before it.
fn to_key(path: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => match segments.last() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push("..".to_string()),
            },
            _ => {}
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectFiles {
        ProjectFiles::from_paths(
            "/work/project",
            &[
                PathBuf::from("/work/project/cs/__init__.py"),
                PathBuf::from("/work/project/cs/util.py"),
            ],
        )
    }

    #[test]
    fn test_resolves_relative_paths() {
        let files = project();
        assert_eq!(
            files.resolve_file("cs/__init__.py"),
            Some(FileHandle::new("cs/__init__.py"))
        );
        assert!(files.resolve_file("./cs/util.py").is_some());
    }

    #[test]
    fn test_resolves_absolute_and_backslash_paths() {
        let files = project();
        assert!(files.resolve_file("/work/project/cs/util.py").is_some());
        assert!(files.resolve_file(r"cs\util.py").is_some());
    }

    #[test]
    fn test_parent_segments_are_folded() {
        let files = project();
        assert_eq!(
            files.resolve_file("pkg/../cs/util.py"),
            Some(FileHandle::new("cs/util.py"))
        );
        assert!(files.resolve_file("/work/project/cs/sub/../util.py").is_some());
        assert!(files.resolve_file("../cs/util.py").is_none());
        assert!(files.resolve_file("pkg/../../cs/util.py").is_none());
    }

    #[test]
    fn test_unknown_paths_do_not_resolve() {
        let files = project();
        assert!(files.resolve_file("cs/missing.py").is_none());
        assert!(files.resolve_file("/elsewhere/cs/util.py").is_none());
        assert!(files.resolve_file("").is_none());
    }

    #[test]
    fn test_handle_for_registered_path() {
        let files = project();
        assert_eq!(files.len(), 2);
        assert_eq!(
            files.handle_for(Path::new("/work/project/cs/util.py")),
            Some(FileHandle::new("cs/util.py"))
        );
    }
}
