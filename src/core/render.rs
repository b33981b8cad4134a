//! Renderer module
//!
//! Serializes report records to the report text format and renders the
//! end-of-run summary.

use crate::core::model::{ReportRecord, RunSummary};
use std::io::{self, Write};

/// First line of every report, followed by a blank line
pub const REPORT_HEADER: &str = "Code:\n\n";

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// Writes a report to any byte sink, one record at a time
pub struct ReportWriter<W: Write> {
    writer: W,
    records: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Wrap a writer and emit the report header
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(REPORT_HEADER.as_bytes())?;
        writer.flush()?;
        Ok(Self { writer, records: 0 })
    }

    /// Append a record and flush it to the sink
    pub fn write_record(&mut self, record: &ReportRecord) -> io::Result<()> {
        write!(
            self.writer,
            "{}:\nDirectory: {}\n\n{}\n\n",
            record.path, record.directory, record.content
        )?;
        self.writer.flush()?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Render the run summary line(s) printed on stdout
pub fn render_summary(
    summary: &RunSummary,
    output_name: &str,
    format: SummaryFormat,
) -> serde_json::Result<String> {
    match format {
        SummaryFormat::Text => Ok(format!(
            "Generated {} with {} files.",
            output_name, summary.included
        )),
        SummaryFormat::Json => serde_json::to_string(summary),
    }
}
