//! Errors raised while talking to the hosted backend.

use serde_json::Value;
use shared_types::StoreError;
use thiserror::Error;

/// Errors that can occur when communicating with the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Not signed in")]
    NotSignedIn,
}

impl BackendError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a `Status` error from a response body. PostgREST, storage
    /// and auth each name the human message differently.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                ["message", "error_description", "msg", "error"]
                    .iter()
                    .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                }
            });
        BackendError::Status { status, message }
    }
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status {
                status: 401 | 403,
                message,
            } => StoreError::Unauthorized(message),
            BackendError::Status { status, message } => StoreError::Rejected { status, message },
            BackendError::NotSignedIn => StoreError::Unauthorized("not signed in".into()),
            BackendError::Parse(message) => StoreError::Decode(message),
            BackendError::Http(e) if e.is_decode() => StoreError::Decode(e.to_string()),
            other => StoreError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_extracted_from_known_shapes() {
        let postgrest = BackendError::from_body(400, r#"{"code":"22P02","message":"invalid input"}"#);
        assert_eq!(postgrest.to_string(), "Backend returned 400: invalid input");

        let auth = BackendError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert!(auth.to_string().ends_with("Invalid login credentials"));

        let plain = BackendError::from_body(502, "bad gateway");
        assert!(plain.to_string().ends_with("bad gateway"));

        assert_eq!(BackendError::from_body(500, "").status(), Some(500));
    }

    #[test]
    fn test_store_error_mapping() {
        let unauthorized: StoreError = BackendError::from_body(401, r#"{"message":"JWT expired"}"#).into();
        assert_eq!(unauthorized, StoreError::Unauthorized("JWT expired".into()));

        let conflict: StoreError = BackendError::from_body(409, r#"{"message":"duplicate"}"#).into();
        assert_eq!(
            conflict,
            StoreError::Rejected {
                status: 409,
                message: "duplicate".into()
            }
        );

        let offline: StoreError = BackendError::Connection("Cannot connect".into()).into();
        assert!(matches!(offline, StoreError::Transport(_)));

        let parse: StoreError = BackendError::Parse("eof".into()).into();
        assert_eq!(parse, StoreError::Decode("eof".into()));
    }
}
