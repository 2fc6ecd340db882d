//! Splitting a delimited source into raw rows.

use crate::error::ReportError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How a source file is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
    /// Column separator byte.
    pub delimiter: u8,
    /// Whether the first row is a header to skip.
    pub has_header: bool,
    /// Whether `"` quotes fields.
    pub quoting: bool,
}

impl SourceFormat {
    /// Pipe-delimited reservation files, no header.
    pub const RESERVATIONS: Self = Self {
        delimiter: b'|',
        has_header: false,
        quoting: false,
    };

    /// Semicolon-delimited meter exports with a header row.
    pub const METER_CSV: Self = Self {
        delimiter: b';',
        has_header: true,
        quoting: true,
    };
}

/// A source row together with its line number.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line in the source.
    pub line: u64,
    /// Untrimmed fields.
    pub fields: StringRecord,
}

/// All data rows of one source, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub(crate) rows: Vec<RawRow>,
}

impl RawTable {
    /// Reads every row from an arbitrary `Read`, dropping the header and blank rows.
    pub fn from_reader<R: Read>(reader: R, format: SourceFormat) -> Result<Self, ReportError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(format.has_header)
            .quoting(format.quoting)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for result in rdr.records() {
            let fields = result?;
            let line = fields.position().map_or(0, csv::Position::line);
            if fields.iter().all(|f| f.trim().is_empty()) {
                tracing::debug!(line, "skipping blank row");
                skipped += 1;
                continue;
            }
            rows.push(RawRow { line, fields });
        }

        tracing::debug!(rows = rows.len(), skipped, "source split into rows");
        Ok(Self { rows })
    }

    /// Opens and reads a file.
    pub fn from_path<P: AsRef<Path>>(path: P, format: SourceFormat) -> Result<Self, ReportError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening source");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), format)
    }

    /// Reads rows from an in-memory string.
    #[inline]
    pub fn from_text(text: &str, format: SourceFormat) -> Result<Self, ReportError> {
        Self::from_reader(text.as_bytes(), format)
    }

    /// Data rows in file order.
    #[inline]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of data rows.
    #[inline]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the source had no data rows.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
