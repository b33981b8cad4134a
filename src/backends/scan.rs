//! File scanning backend
//!
//! Uses walkdir for traversal and selects allow-listed regular files

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::extensions::{extension_of, is_allowed};
use crate::core::model::FileCandidate;
use crate::core::paths::resolve;

/// Candidates found under a root plus the per-entry problems met on the way
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Allow-listed regular files, sorted by path
    pub candidates: Vec<FileCandidate>,

    /// One message per entry that could not be inspected
    pub errors: Vec<String>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Walk `root` recursively and collect report candidates.
///
/// `excluded` holds canonical paths that are never selected (the running
/// executable and the report file). Directory symlinks are not followed.
pub fn scan_candidates(root: &Path, excluded: &[PathBuf]) -> ScanResult {
    let mut result = ScanResult::default();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                result
                    .errors
                    .push(format!("Exception processing {}: {}", path, err));
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            continue;
        }

        match inspect_entry(&entry, excluded) {
            Ok(Some(candidate)) => {
                trace!(path = %path.display(), ext = %candidate.extension, "candidate");
                result.candidates.push(candidate);
            }
            Ok(None) => {}
            Err(message) => {
                result
                    .errors
                    .push(format!("Exception processing {}: {}", path.display(), message));
            }
        }
    }

    result.candidates.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        root = %root.display(),
        candidates = result.candidates.len(),
        errors = result.errors.len(),
        "scan complete"
    );
    result
}

/// Decide whether one non-directory entry becomes a candidate
fn inspect_entry(
    entry: &walkdir::DirEntry,
    excluded: &[PathBuf],
) -> Result<Option<FileCandidate>, String> {
    let path = entry.path();

    let is_file = if entry.path_is_symlink() {
        fs::metadata(path).map_err(|e| e.to_string())?.is_file()
    } else {
        entry.file_type().is_file()
    };
    if !is_file {
        return Ok(None);
    }

    let extension = match extension_of(path) {
        Some(ext) if is_allowed(&ext) => ext,
        _ => return Ok(None),
    };

    let resolved = resolve(path).map_err(|e| e.to_string())?;
    if excluded.iter().any(|ex| *ex == resolved) {
        debug!(path = %path.display(), "excluded");
        return Ok(None);
    }

    Ok(Some(FileCandidate::new(
        path.to_path_buf(),
        resolved,
        extension,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .candidates
            .iter()
            .map(|c| {
                c.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = tempdir().unwrap();
        let result = scan_candidates(temp.path(), &[]);
        assert!(result.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("a.py")).unwrap();
        File::create(temp.path().join("b.txt")).unwrap();
        File::create(temp.path().join("Makefile")).unwrap();
        File::create(temp.path().join("C.JSON")).unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(names(&result, temp.path()), vec!["C.JSON", "a.py"]);
        assert_eq!(result.candidates[0].extension, ".json");
    }

    #[test]
    fn test_scan_recurses_and_sorts() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src/nested")).unwrap();
        File::create(temp.path().join("z.rs")).unwrap();
        File::create(temp.path().join("src/nested/b.rs")).unwrap();
        File::create(temp.path().join("src/a.rs")).unwrap();
        File::create(temp.path().join("main.go")).unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(
            names(&result, temp.path()),
            vec!["main.go", "src/a.rs", "src/nested/b.rs", "z.rs"]
        );
    }

    #[test]
    fn test_scan_skips_directories_with_allowed_extension() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("config.d.toml")).unwrap();
        File::create(temp.path().join("config.d.toml/real.toml")).unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(names(&result, temp.path()), vec!["config.d.toml/real.toml"]);
    }

    #[test]
    fn test_scan_excludes_given_paths() {
        let temp = tempdir().unwrap();
        let keep = temp.path().join("keep.sh");
        let skip = temp.path().join("self.sh");
        File::create(&keep).unwrap();
        File::create(&skip).unwrap();

        let excluded = vec![skip.canonicalize().unwrap()];
        let result = scan_candidates(temp.path(), &excluded);
        assert_eq!(names(&result, temp.path()), vec!["keep.sh"]);
    }

    #[test]
    fn test_scan_candidate_parent() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("lib")).unwrap();
        File::create(temp.path().join("lib/util.lua")).unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(result.candidates[0].parent, temp.path().join("lib"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_reports_broken_symlink() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("ok.rb")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing.rb"), temp.path().join("dangling.rb"))
            .unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(names(&result, temp.path()), vec!["ok.rb"]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("dangling.rb"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_file_symlinks() {
        let temp = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let target = outside.path().join("shared.h");
        fs::write(&target, "#pragma once\n").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("shared.h")).unwrap();

        let result = scan_candidates(temp.path(), &[]);
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].resolved, target.canonicalize().unwrap());
    }
}
