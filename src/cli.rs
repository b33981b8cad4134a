//! CLI module - Command-line interface definition and handler

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::render::SummaryFormat;
use crate::flows::aggregate::{run_aggregate, AggregateOptions, DEFAULT_OUTPUT};

/// code2text - concatenate the source files of a directory tree into one report.
#[derive(Parser, Debug)]
#[command(name = "code2text")]
#[command(
    author,
    version,
    about,
    long_about = r#"code2text walks a directory tree, selects every file whose extension is on
a fixed allow-list of source and config formats, and writes their contents into
a single text report.

Each record in the report carries the file's path and directory relative to the
root. Files are ordered by path, so repeated runs over an unchanged tree produce
byte-identical reports.

With no arguments the current directory is scanned and code2text_output.txt is
written there. If no file matches, nothing is written.

Examples:
    code2text
    code2text --root ../project
    code2text --output context.txt --json
"#
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(
        long,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to scan (defaults to the current directory).\n\n\
All paths in the report are relative to this root, and the report file is\n\
written inside it."
    )]
    pub root: PathBuf,

    /// Report file name, relative to ROOT.
    #[arg(
        long,
        default_value = DEFAULT_OUTPUT,
        value_name = "FILE",
        long_help = "Name of the report file, created or overwritten inside ROOT.\n\n\
The report itself is never included as an input, even when its extension is\n\
on the allow-list."
    )]
    pub output: String,

    /// Print the run summary as JSON.
    #[arg(
        long,
        long_help = "Print the end-of-run summary as a single JSON object (root, output,\n\
candidates, included, latin1, unreadable, written) instead of a text line."
    )]
    pub json: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored diagnostics. This is useful when piping to files or when\n\
your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (summary only).
    #[arg(
        short,
        long,
        long_help = "Suppress per-file diagnostics and internal logging. The final summary is\n\
still printed."
    )]
    pub quiet: bool,

    /// Verbose mode (repeat for more detail).
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        long_help = "Increase internal logging on stderr: -v info, -vv debug, -vvv trace.\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub verbose: u8,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    setup_logging(cli.verbose, cli.quiet, cli.no_color);
    debug!(?cli, "parsed arguments");

    let mut options = AggregateOptions::new(cli.root);
    options.output = cli.output;
    options.quiet = cli.quiet;

    match std::env::current_exe() {
        Ok(exe) => options.exclude.push(exe),
        Err(err) => warn!("cannot locate the running executable: {}", err),
    }

    let format = if cli.json {
        SummaryFormat::Json
    } else {
        SummaryFormat::Text
    };

    run_aggregate(options, format)
}

/// Filter directives used when RUST_LOG is not set
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn setup_logging(verbose: u8, quiet: bool, no_color: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["code2text"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.output, DEFAULT_OUTPUT);
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["code2text", "-vv", "--root", "/tmp", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("/tmp"));
        assert!(cli.json);
    }

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(3), "trace");
        assert_eq!(default_filter(9), "trace");
    }
}
