//! Errors raised while loading records and rendering reports.

/// Failure while reading, parsing or reporting delimited records.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// I/O failure while reading the source file or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The delimited file could not be split into rows.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A numeric field did not parse.
    #[error("Invalid number '{value}' in column '{column}'")]
    Number {
        /// Offending field text.
        value: String,
        /// Column name.
        column: &'static str,
    },
    /// A calendar date did not match `YYYY-MM-DD` (or `dd.mm.yyyy` for user input).
    #[error("Invalid date '{value}'")]
    Date {
        /// Offending field text.
        value: String,
    },
    /// A time of day did not match the declared format.
    #[error("Invalid time '{value}', expected {expected}")]
    Time {
        /// Offending field text.
        value: String,
        /// Human readable format that was expected.
        expected: &'static str,
    },
    /// A combined date-time field did not parse.
    #[error("Invalid timestamp '{value}'")]
    Timestamp {
        /// Offending field text.
        value: String,
    },
    /// A row had fewer fields than its schema requires.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    ShortRow {
        /// 1-based line number in the source.
        line: u64,
        /// Column count of the schema.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// A monetary amount did not fit into `Decimal`.
    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),
    /// Interactive input was not in the expected format.
    #[error("Invalid input: {0}")]
    UserInput(String),
    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
