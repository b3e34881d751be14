//! Error types for the API client

use serde_json::Value;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Arguments rejected before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Build an API response error from a failed response.
    ///
    /// Prefers the body's `error` then `message` field. A body that is not
    /// JSON falls back to the reason phrase, and anything else to
    /// `HTTP error! status: N`.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        Self::api_response(status, response_message(status, reason, body))
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => {
                // Retry on connection errors, timeouts
                e.is_connect() || e.is_timeout()
            }
            Self::ApiResponse { status, .. } => {
                // Retry on 5xx errors and 429 (rate limited)
                *status >= 500 || *status == 429
            }
            Self::Config(_)
            | Self::Json(_)
            | Self::InvalidInput(_)
            | Self::InvalidUrl(_) => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Message suitable for showing to a user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiResponse { message, .. } | Self::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

fn response_message(status: u16, reason: Option<&str>, body: &str) -> String {
    let fallback = format!("HTTP error! status: {status}");

    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|field| json.get(field).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map_or(fallback, str::to_string),
        Err(_) => reason.filter(|r| !r.is_empty()).map_or(fallback, str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: &ApiError) -> &str {
        match err {
            ApiError::ApiResponse { message, .. } => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_message_from_error_field() {
        let err = ApiError::from_response(404, Some("Not Found"), r#"{"error": "City not found"}"#);
        assert_eq!(message(&err), "City not found");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_message_field_fallback() {
        let err = ApiError::from_response(400, Some("Bad Request"), r#"{"message": "Bad slug"}"#);
        assert_eq!(message(&err), "Bad slug");
    }

    #[test]
    fn test_error_field_wins() {
        let err = ApiError::from_response(400, None, r#"{"message": "second", "error": "first"}"#);
        assert_eq!(message(&err), "first");
    }

    #[test]
    fn test_json_without_message_uses_status() {
        let err = ApiError::from_response(500, Some("Internal Server Error"), r#"{"ok": false}"#);
        assert_eq!(message(&err), "HTTP error! status: 500");
        assert!(err.is_server_error());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_non_json_uses_reason() {
        let err = ApiError::from_response(502, Some("Bad Gateway"), "<html>upstream</html>");
        assert_eq!(message(&err), "Bad Gateway");
    }

    #[test]
    fn test_non_json_without_reason() {
        let err = ApiError::from_response(599, None, "");
        assert_eq!(message(&err), "HTTP error! status: 599");
    }

    #[test]
    fn test_invalid_input_not_retryable() {
        let err = ApiError::invalid_input("Invalid city ID");
        assert!(!err.is_retryable());
        assert!(!err.is_client_error());
        assert_eq!(err.user_message(), "Invalid city ID");
    }
}
