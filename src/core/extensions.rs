//! The fixed allow-list of file extensions included in a report

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Recognized extensions, lower-cased, with the leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".c", ".cpp", ".cc", ".cxx", ".h", ".hh", ".hpp", ".hxx", ".ino", ".py", ".pyw", ".java", ".js",
    ".ts", ".tsx", ".jsx", ".rb", ".go", ".rs", ".swift", ".kt", ".kts", ".cs", ".php", ".html",
    ".htm", ".css", ".scss", ".sass", ".lua", ".sh", ".bat", ".ps1", ".sql", ".r", ".m", ".asm",
    ".s", ".json", ".xml", ".yml", ".yaml", ".toml", ".ini",
];

static ALLOWED_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_EXTENSIONS.iter().copied().collect());

/// Lower-cased extension of `path` with a leading dot, e.g. `.rs`.
///
/// Returns `None` for paths without an extension. Dotfiles such as
/// `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Check whether an extension (as returned by [`extension_of`]) is allow-listed
pub fn is_allowed(extension: &str) -> bool {
    ALLOWED_SET.contains(extension)
}

/// Render the allow-list the way it appears in diagnostics
pub fn describe() -> String {
    let quoted: Vec<String> = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!("'{}'", ext))
        .collect();
    format!("[{}]", quoted.join(", "))
}
