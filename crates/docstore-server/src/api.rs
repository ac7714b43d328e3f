//! JSON request and response envelopes.

use serde::{Deserialize, Serialize};

use docstore_types::ApiObject;

/// The request envelope accepted by every POST endpoint.
///
/// Endpoints read only the fields they need; everything is optional at
/// the serde level so a login body need not carry an object list and a
/// set body need not carry credentials.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Session key; empty means anonymous.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub objects: Vec<ApiObject>,
}

/// The response envelope produced by every endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Session key, set by login.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    /// Session expiry in RFC 3339, set by login.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expires: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ApiObject>,
}

impl ApiResponse {
    /// A bare success.
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// A success carrying objects.
    pub fn with_objects(objects: Vec<ApiObject>) -> Self {
        Self {
            success: true,
            objects,
            ..Self::default()
        }
    }

    /// A failure with a user-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }
}
