use thiserror::Error;

/// Errors from raw storage operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An empty key was supplied.
    #[error("empty storage key")]
    EmptyKey,

    /// I/O error from the underlying medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
