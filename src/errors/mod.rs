//! Error handling module for the presensi client.
//!
//! Provides one error type for every failure the client can hit, with stable
//! codes and the short message shown to the user.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const API_ERROR: &str = "API_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// A single per-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Client error type.
#[derive(Debug)]
pub enum ClientError {
    /// No session token, or the backend rejected it
    Unauthorized(String),
    /// Non-2xx response from the backend
    Api {
        status: u16,
        message: String,
        /// Per-field messages in the order the backend sent them
        field_errors: Vec<(String, Vec<String>)>,
    },
    /// Transport failure before a response arrived
    Network(String),
    /// Response body or payload could not be decoded
    Decode(String),
    /// Local file system failure
    Io(String),
    /// Local key-value storage failure
    Storage(String),
    /// The platform lacks a required capability
    Unsupported(String),
    /// Client-side form validation failed; the request was never sent
    Validation(Vec<FieldError>),
}

/// Shape of a backend error body. Both fields are optional.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Map<String, Value>>,
}

/// Keep the backend's key order; a lone string counts as a one-item list.
fn ordered_field_errors(errors: Map<String, Value>) -> Vec<(String, Vec<String>)> {
    errors
        .into_iter()
        .map(|(field, value)| {
            let messages = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                Value::String(message) => vec![message],
                _ => Vec::new(),
            };
            (field, messages)
        })
        .collect()
}

impl ClientError {
    /// Build an API error from a status code and raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        if status == 401 {
            return ClientError::Unauthorized(message);
        }

        ClientError::Api {
            status,
            message,
            field_errors: parsed.errors.map(ordered_field_errors).unwrap_or_default(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Unauthorized(_) => codes::UNAUTHORIZED,
            ClientError::Api { .. } => codes::API_ERROR,
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Io(_) => codes::IO_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Unsupported(_) => codes::UNSUPPORTED,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Unauthorized(msg) => msg.clone(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Io(msg) => msg.clone(),
            ClientError::Storage(msg) => msg.clone(),
            ClientError::Unsupported(msg) => msg.clone(),
            ClientError::Validation(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Backend validation messages flattened in the order received, one per
    /// line. `None` when the backend sent no `errors` map.
    pub fn flattened_field_errors(&self) -> Option<String> {
        match self {
            ClientError::Api { field_errors, .. } if !field_errors.is_empty() => Some(
                field_errors
                    .iter()
                    .flat_map(|(_, messages)| messages)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Invalid response body: {}", err))
        } else {
            ClientError::Network(format!("Network error: {}", err))
        }
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        ClientError::Storage(format!("Storage error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        ClientError::Io(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<base64::DecodeError> for ClientError {
    fn from(err: base64::DecodeError) -> Self {
        tracing::error!("Base64 error: {:?}", err);
        ClientError::Decode(format!("Base64 error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_backend_message() {
        let err = ClientError::from_response(500, r#"{"message":"Server Error"}"#);
        assert_eq!(err.error_code(), codes::API_ERROR);
        assert_eq!(err.message(), "Server Error");
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[test]
    fn test_from_response_without_body() {
        let err = ClientError::from_response(404, "");
        assert_eq!(err.message(), "Request failed with status code 404");
        assert!(err.flattened_field_errors().is_none());
    }

    #[test]
    fn test_unauthorized_status_maps_to_unauthorized() {
        let err = ClientError::from_response(401, r#"{"message":"Unauthenticated."}"#);
        assert_eq!(err.error_code(), codes::UNAUTHORIZED);
        assert_eq!(err.to_string(), "UNAUTHORIZED: Unauthenticated.");
    }

    #[test]
    fn test_flattened_field_errors() {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email has already been taken."],
                "telp": ["The telp must be at least 11 characters.", "The telp must be numeric."]
            }
        }"#;
        let err = ClientError::from_response(422, body);
        assert_eq!(
            err.flattened_field_errors().as_deref(),
            Some(
                "The email has already been taken.\n\
                 The telp must be at least 11 characters.\n\
                 The telp must be numeric."
            )
        );
    }

    #[test]
    fn test_flattened_field_errors_keep_server_order() {
        let body = r#"{
            "errors": {
                "telp": ["The telp has already been taken."],
                "email": "The email has already been taken.",
                "agama": ["The agama field is required."]
            }
        }"#;
        let err = ClientError::from_response(422, body);
        assert_eq!(err.message(), "Request failed with status code 422");
        assert_eq!(
            err.flattened_field_errors().as_deref(),
            Some(
                "The telp has already been taken.\n\
                 The email has already been taken.\n\
                 The agama field is required."
            )
        );
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ClientError::Validation(vec![
            FieldError::new("email", "Email is required"),
            FieldError::new("password", "Password must be at least 8 characters"),
        ]);
        assert_eq!(
            err.message(),
            "email: Email is required\npassword: Password must be at least 8 characters"
        );
    }
}
