//! Error types for fleet-output.

use thiserror::Error;

use fleet_sim::StreamError;

/// Errors that can occur when writing tables.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("writer already finished")]
    Finished,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;

impl From<OutputError> for StreamError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Io(io)   => StreamError::Io(io),
            OutputError::Finished => StreamError::Unavailable("writer already finished".into()),
            other                 => StreamError::Rejected(other.to_string()),
        }
    }
}
