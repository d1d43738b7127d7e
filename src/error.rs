use reqwest::StatusCode;
use serde::de::IgnoredAny;
use thiserror::Error;

use crate::models::Document;

/// Shown when a failure carries no usable message of its own.
pub const GENERIC_MESSAGE: &str = "Something went wrong.";

/// Failures surfaced by a transit lookup. None of them are fatal; each one
/// degrades to a single user-visible message.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    #[error("Request failed with status code {}", .0.as_u16())]
    Status(StatusCode),

    #[error("Unexpected response from the transit API: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{kind} not found.")]
    NotFound { kind: &'static str, id: String },

    #[error("Cannot build a request URL from {0:?}")]
    InvalidUrl(String),
}

impl LookupError {
    /// Builds the error for a non-success response, preferring the `detail`
    /// of the first entry in the body's `errors` array.
    pub fn from_error_body(status: StatusCode, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<Document<IgnoredAny>>(body)
            .ok()
            .and_then(|doc| doc.errors.into_iter().next())
            .and_then(|e| e.detail)
            .filter(|d| !d.trim().is_empty());

        match detail {
            Some(detail) => LookupError::Api { status, detail },
            None => LookupError::Status(status),
        }
    }

    /// The message to show the user.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_detail_wins() {
        let body = br#"{"errors": [{"detail": "Route does not exist"}, {"detail": "second"}]}"#;
        let err = LookupError::from_error_body(StatusCode::NOT_FOUND, body);
        assert!(matches!(err, LookupError::Api { .. }));
        assert_eq!(err.user_message(), "Route does not exist");
    }

    #[test]
    fn test_only_first_error_is_consulted() {
        let body = br#"{"errors": [{"code": "bad_request"}, {"detail": "second"}]}"#;
        let err = LookupError::from_error_body(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.user_message(), "Request failed with status code 400");
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = LookupError::from_error_body(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert!(matches!(err, LookupError::Status(StatusCode::BAD_GATEWAY)));
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_not_found_message() {
        let err = LookupError::NotFound {
            kind: "Route",
            id: "999".to_string(),
        };
        assert_eq!(err.user_message(), "Route not found.");
    }

    #[test]
    fn test_blank_detail_is_ignored() {
        let body = br#"{"errors": [{"detail": "   "}]}"#;
        let err = LookupError::from_error_body(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, LookupError::Status(_)));
    }
}
