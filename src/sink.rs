//! Writing reports to the console or a file.

use crate::error::ReportError;
use crate::report::Report;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Destination of a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    /// Standard output.
    Stdout,
    /// A file that is created or overwritten.
    File(PathBuf),
}

impl ReportSink {
    /// Writes every line of the report followed by `\n`.
    pub fn emit(&self, report: &Report) -> Result<(), ReportError> {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                write_report(&mut stdout.lock(), report)
            }
            Self::File(path) => {
                let mut out = BufWriter::new(File::create(path)?);
                write_report(&mut out, report)?;
                out.flush()?;
                tracing::info!(path = %path.display(), lines = report.lines().len(), "report written");
                Ok(())
            }
        }
    }
}

/// Writes the report into any writer.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<(), ReportError> {
    for line in report.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
