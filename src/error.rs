//! Error types for the pharmacy counter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fatal operations.
pub type Result<T> = std::result::Result<T, PharmacyError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum PharmacyError {
    /// The input file could not be opened
    #[error("Failed to open input file {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output file could not be created
    #[error("Failed to open output file {} for writing: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed while reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing positional arguments
    #[error("Missing arguments. Usage: pharmacy-counting <input.txt> <output.txt>")]
    MissingArgument,
}

/// A single line that could not be turned into a record.
///
/// These are recovered from: the line is counted as corrupt and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into exactly five fields
    #[error("expected 5 fields, found {fields}: {line}")]
    MalformedRecord { fields: usize, line: String },

    /// The cost field is not a number
    #[error("cost {value:?} is not a number: {line}")]
    InvalidCost { value: String, line: String },
}
