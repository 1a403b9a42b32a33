//! FILENAME: persistence/src/error.rs

use thiserror::Error;

/// Load-time failures: the source is unreadable, structurally broken, or
/// missing a required column. All of these abort initialization; the
/// dashboard cannot present filters or metrics without a loaded store.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Malformed field values inside an otherwise readable source.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Row {row}: cannot parse '{value}' as a month/day/year date")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: column {column} value '{value}' is not numeric")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: column {column} value {value} is negative")]
    NegativeValue {
        row: usize,
        column: &'static str,
        value: f64,
    },
}
