//! code2text - Export a source tree as a single annotated text report
//!
//! code2text provides:
//! - Recursive scanning filtered by a fixed extension allow-list
//! - UTF-8 decoding with a Latin-1 fallback
//! - A deterministic, path-ordered report with relative paths and directories

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
