//! Path normalization utilities
//!
//! Resolves paths to canonical form and renders them relative to the root,
//! always using '/' as separator.

use std::path::{Path, PathBuf};

use crate::core::model::PathError;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve a path to its canonical, symlink-free absolute form
pub fn resolve(path: &Path) -> Result<PathBuf, PathError> {
    path.canonicalize().map_err(|source| PathError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a path that may not exist yet.
///
/// Existing paths are canonicalized directly; otherwise the parent is
/// canonicalized and the file name appended.
pub fn resolve_prospective(path: &Path) -> Result<PathBuf, PathError> {
    if let Ok(resolved) = path.canonicalize() {
        return Ok(resolved);
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or_else(|| PathError::Resolve {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;

    Ok(resolve(parent)?.join(name))
}

/// Render `path` relative to `root` for display in the report.
///
/// `root` itself renders as `.`.
pub fn display_relative(path: &Path, root: &Path) -> Result<String, PathError> {
    match make_relative(path, root) {
        Some(rel) if rel.is_empty() => Ok(".".to_string()),
        Some(rel) => Ok(rel),
        None => Err(PathError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        }),
    }
}
