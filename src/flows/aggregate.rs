//! Aggregate flow - Concatenate every allow-listed file under a root into one report
//!
//! Steps:
//! 1. Resolve the root, the running executable and the report path
//! 2. Scan for candidates, excluding the executable and the report itself
//! 3. Stop early (without touching the report) when nothing matches
//! 4. Decode each candidate and append it as a record, flushing as we go

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::backends::scan::scan_candidates;
use crate::core::extensions;
use crate::core::file_reader::read_with_fallback;
use crate::core::model::{
    DecodedText, FileCandidate, ReadError, ReportRecord, RunSummary, TextEncoding,
};
use crate::core::paths::{display_relative, normalize_path, resolve, resolve_prospective};
use crate::core::render::{render_summary, ReportWriter, SummaryFormat};

/// Default report file name, created in the root directory
pub const DEFAULT_OUTPUT: &str = "code2text_output.txt";

/// Options for one aggregation run
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory to scan; the report is written here too
    pub root: PathBuf,

    /// Report file name, relative to the root
    pub output: String,

    /// Extra paths never included in the report (typically the running executable)
    pub exclude: Vec<PathBuf>,

    /// Suppress per-file diagnostics
    pub quiet: bool,
}

impl AggregateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: DEFAULT_OUTPUT.to_string(),
            exclude: Vec::new(),
            quiet: false,
        }
    }
}

/// Run the aggregate command, printing diagnostics and the summary to stdout
pub fn run_aggregate(options: AggregateOptions, format: SummaryFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut console = stdout.lock();

    let summary = aggregate(&options, &mut console)?;

    if summary.written || format == SummaryFormat::Json {
        let line = render_summary(&summary, &options.output, format)
            .context("Failed to serialize run summary")?;
        writeln!(console, "{}", line)?;
    }
    Ok(())
}

/// Produce the report for `options.root`.
///
/// Per-entry and per-file problems are written to `console` and never abort
/// the run. Only an unresolvable root or an unwritable report is fatal.
pub fn aggregate<C: Write>(options: &AggregateOptions, console: &mut C) -> Result<RunSummary> {
    aggregate_with(options, console, read_with_fallback)
}

/// [`aggregate`] with the file reader supplied by the caller
pub fn aggregate_with<C, R>(
    options: &AggregateOptions,
    console: &mut C,
    mut read: R,
) -> Result<RunSummary>
where
    C: Write,
    R: FnMut(&Path) -> Result<DecodedText, ReadError>,
{
    let root = resolve(&options.root)
        .with_context(|| format!("Failed to resolve root {}", options.root.display()))?;
    let output_path = root.join(&options.output);
    let resolved_output = resolve_prospective(&output_path)
        .with_context(|| format!("Failed to resolve output {}", output_path.display()))?;

    let mut excluded = vec![resolved_output.clone()];
    for path in &options.exclude {
        match resolve(path) {
            Ok(resolved) => excluded.push(resolved),
            Err(err) => warn!("cannot exclude {}: {}", path.display(), err),
        }
    }

    info!(root = %root.display(), output = %resolved_output.display(), "scanning");

    let scan = scan_candidates(&root, &excluded);
    for message in &scan.errors {
        notice(console, options.quiet, message)?;
    }

    let mut summary = RunSummary {
        root: normalize_path(&root),
        output: normalize_path(&output_path),
        candidates: scan.candidates.len(),
        included: 0,
        latin1: 0,
        unreadable: 0,
        written: false,
    };

    if scan.is_empty() {
        writeln!(
            console,
            "No files with extensions {} found in {}. Exiting.",
            extensions::describe(),
            root.display()
        )?;
        return Ok(summary);
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut report = ReportWriter::new(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    summary.written = true;

    for candidate in &scan.candidates {
        let decoded = match read(&candidate.path) {
            Ok(decoded) => decoded,
            Err(err) => {
                notice(console, options.quiet, &err.to_string())?;
                summary.unreadable += 1;
                continue;
            }
        };

        let (path, directory) = display_names(candidate, &root, console, options.quiet)?;
        report
            .write_record(&ReportRecord {
                path,
                directory,
                content: decoded.content,
            })
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        if decoded.encoding == TextEncoding::Latin1 {
            summary.latin1 += 1;
        }
    }

    summary.included = report.records();
    report
        .finish()
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    debug!(
        included = summary.included,
        unreadable = summary.unreadable,
        latin1 = summary.latin1,
        "report written"
    );
    Ok(summary)
}

/// Display path and directory of a candidate, relative to root when possible
fn display_names<C: Write>(
    candidate: &FileCandidate,
    root: &Path,
    console: &mut C,
    quiet: bool,
) -> Result<(String, String)> {
    let path = match display_relative(&candidate.resolved, root) {
        Ok(rel) => rel,
        Err(err) => {
            notice(
                console,
                quiet,
                &format!(
                    "Exception resolving path for {}: {}",
                    candidate.path.display(),
                    err
                ),
            )?;
            normalize_path(&candidate.resolved)
        }
    };

    let parent = match resolve(&candidate.parent) {
        Ok(parent) => parent,
        Err(err) => {
            notice(
                console,
                quiet,
                &format!(
                    "Exception resolving directory for {}: {}",
                    candidate.path.display(),
                    err
                ),
            )?;
            candidate.parent.clone()
        }
    };
    let directory = match display_relative(&parent, root) {
        Ok(rel) => rel,
        Err(err) => {
            notice(
                console,
                quiet,
                &format!(
                    "Exception resolving directory for {}: {}",
                    candidate.path.display(),
                    err
                ),
            )?;
            normalize_path(&parent)
        }
    };

    Ok((path, directory))
}

/// Print a per-entry diagnostic unless quiet
fn notice<C: Write>(console: &mut C, quiet: bool, message: &str) -> std::io::Result<()> {
    debug!("{}", message);
    if quiet {
        return Ok(());
    }
    writeln!(console, "{}", message.yellow())
}
