//! Error types for Tally core.

use thiserror::Error;

/// Errors that can occur while loading, saving or importing sheets.
///
/// Formula evaluation never produces one of these; its failures are
/// reported as [`ErrorKind`](tally_engine::engine::ErrorKind) values.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("No file path set")]
    NoFilePath,

    #[error("CSV file is empty")]
    EmptyCsv,
}

pub type Result<T> = std::result::Result<T, TallyError>;
