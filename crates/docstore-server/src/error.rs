use axum::http::StatusCode;
use thiserror::Error;

use docstore_store::{ErrorKind, StoreError};

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The supplied session key is unknown or expired.
    #[error("invalid or expired session")]
    InvalidSession,

    /// The store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Storage backend construction failed.
    #[error("storage backend error: {0}")]
    Backend(#[from] docstore_backend::BackendError),

    /// Configuration problem discovered at startup.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// The HTTP status this error maps onto.
    ///
    /// The store core carries no HTTP semantics; this is the single place
    /// where its error kinds become status codes.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSession => StatusCode::FORBIDDEN,
            Self::Store(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Permission => StatusCode::FORBIDDEN,
                ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
                ErrorKind::InvalidArgument | ErrorKind::ObjectNotSpecified => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Backend(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_by_error_kind() {
        let cases = [
            (StoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (StoreError::Permission("set:x".into()), StatusCode::FORBIDDEN),
            (StoreError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                StoreError::InvalidArgument("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::ObjectNotSpecified, StatusCode::BAD_REQUEST),
            (
                StoreError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status(), status);
        }
    }

    #[test]
    fn invalid_session_is_forbidden() {
        assert_eq!(ServerError::InvalidSession.status(), StatusCode::FORBIDDEN);
    }
}
