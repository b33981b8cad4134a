//! Data model shared by the scanner, the reader and the report writer

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file selected during the walk for inclusion in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Path as encountered during the walk (absolute, may contain symlinks)
    pub path: PathBuf,

    /// Canonical, symlink-free path
    pub resolved: PathBuf,

    /// Lower-cased extension with the leading dot
    pub extension: String,

    /// Parent directory of the walked path
    pub parent: PathBuf,
}

impl FileCandidate {
    pub fn new(path: PathBuf, resolved: PathBuf, extension: String) -> Self {
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        Self {
            path,
            resolved,
            extension,
            parent,
        }
    }
}

/// One per-file entry of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// File path relative to root (or absolute, when outside root)
    pub path: String,

    /// Parent directory relative to root (or absolute, when outside root)
    pub directory: String,

    /// Decoded file content
    pub content: String,
}

/// Text encoding a file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// Successfully decoded file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: TextEncoding,
}

/// A file whose content could not be obtained under any encoding
#[derive(Debug, Error)]
#[error("Failed to read {}: {source}", .path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors raised while resolving or relativizing a path
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot resolve {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not under {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Outcome of one aggregation run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Canonical root directory that was scanned
    pub root: String,

    /// Path of the report file
    pub output: String,

    /// Number of files that passed extension and exclusion filtering
    pub candidates: usize,

    /// Number of records actually written to the report
    pub included: usize,

    /// Number of included files decoded with the Latin-1 fallback
    pub latin1: usize,

    /// Number of candidates dropped because they could not be read
    pub unreadable: usize,

    /// Whether a report file was created
    pub written: bool,
}
