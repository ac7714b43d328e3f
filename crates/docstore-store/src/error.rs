use thiserror::Error;

/// Errors from store client operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An access gate rejected the operation.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Login failed: unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A malformed argument, e.g. an empty UID where one is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A request that requires objects carried none.
    #[error("no object specified")]
    ObjectNotSpecified,

    /// The filter expression failed to parse.
    #[error("query parse error: {0}")]
    Query(#[from] docstore_query::QueryError),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(#[from] docstore_backend::BackendError),

    /// Stored bytes could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`StoreError`], consumed by callers that map
/// errors onto an external vocabulary (the HTTP layer's status codes).
///
/// The classification is exhaustive over `StoreError` so that mapping can
/// be tested independent of the store itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Permission,
    InvalidCredentials,
    InvalidArgument,
    ObjectNotSpecified,
    Unknown,
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Permission(_) => ErrorKind::Permission,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::InvalidArgument(_) | Self::Query(_) => ErrorKind::InvalidArgument,
            Self::ObjectNotSpecified => ErrorKind::ObjectNotSpecified,
            Self::Backend(_) | Self::Serialization(_) | Self::Internal(_) => ErrorKind::Unknown,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
