use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A field held a value outside the scalar union (array, object, null).
    #[error("unsupported value for field {field}: expected string, number, or bool")]
    UnsupportedValue { field: String },

    /// The reserved UID key held a non-string value.
    #[error("invalid uid: expected a string")]
    InvalidUid,
}
