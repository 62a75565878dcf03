//! Error types for samplesheet validation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for samplesheet operations.
#[derive(Debug, Error)]
pub enum SamplesheetError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an already-open stream.
    #[error("IO error on the samplesheet stream: {0}")]
    Stream(#[from] std::io::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The tabular dialect could not be inferred from the leading lines.
    #[error("Could not detect the samplesheet format: {0}")]
    FormatDetection(String),

    /// The header lacks at least one required column.
    #[error("The sample sheet **must** contain these column headers: {}.", .0.join(", "))]
    MissingRequiredColumns(Vec<String>),

    /// A row failed validation. `line` is 1-based and counts the header line.
    #[error("{source} On line {line}.")]
    Row {
        line: usize,
        #[source]
        source: RowError,
    },

    /// Two rows share the same (sample, RCC file, RCC file name) triple.
    #[error("The pair of sample name and RCC file must be unique.")]
    DuplicateRow,
}

/// Failure of a single row's field validation.
#[derive(Debug, Error)]
pub enum RowError {
    /// A required field was left blank.
    #[error("{field} is required.")]
    EmptyField { field: String },

    /// A file reference carries a disallowed extension.
    #[error("The RCC file has an unrecognized extension: {file}\nIt should be one of: {}", .allowed.join(", "))]
    UnrecognizedExtension { file: String, allowed: Vec<String> },
}

/// Result type alias for samplesheet operations.
pub type Result<T> = std::result::Result<T, SamplesheetError>;
