use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("streaming service unavailable: health check failed")]
    StreamerUnavailable,
}

pub type SimResult<T> = Result<T, SimError>;

/// Failure reported by a [`Streamer`][crate::Streamer].
///
/// Never aborts a run: failed batches stay buffered, failed anomalies are
/// logged and dropped.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("batch rejected: {0}")]
    Rejected(String),

    #[error("sink unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
