//! Error types for catalog image generation.

use std::time::Duration;

/// Message shown when the service answers without any image part.
pub const NO_IMAGE_MESSAGE: &str = "No image was generated. Please try again.";

/// Message shown when an error carries no usable text of its own.
pub const FALLBACK_MESSAGE: &str =
    "Something went wrong while generating the image. Please try again.";

/// Longest service message kept after sanitizing.
const MAX_MESSAGE_LEN: usize = 500;

/// Errors that can occur while selecting, generating or saving images.
#[derive(Debug, thiserror::Error)]
pub enum SilkStudioError {
    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Quota or rate limit exceeded.
    #[error("rate limited ({message}), retry after {retry_after:?}")]
    RateLimited {
        retry_after: Option<Duration>,
        message: String,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// The service rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service responded, but no part carried inline image data.
    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImageGenerated,

    /// The response could not be interpreted.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed data URI or base64 payload.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (reading the upload, saving the download).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SilkStudioError {
    /// Returns the text to show the user for this error.
    ///
    /// Service failures surface their own message; anything blank falls back
    /// to [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::NoImageGenerated => return NO_IMAGE_MESSAGE.to_string(),
            Self::Auth(m)
            | Self::ContentBlocked(m)
            | Self::InvalidRequest(m)
            | Self::UnexpectedResponse(m)
            | Self::Decode(m) => m.clone(),
            Self::Api { message, .. } | Self::RateLimited { message, .. } => message.clone(),
            Self::Network(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
            Self::Json(e) => e.to_string(),
        };

        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Normalizes a raw service error body for display and logging.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_MESSAGE_LEN {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(MAX_MESSAGE_LEN).collect();
    format!("{truncated}...")
}

/// Pulls `error.message` out of a Google-style JSON error body.
///
/// Falls back to the sanitized body when it is not JSON or has no message.
pub(crate) fn service_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match parsed {
        Some(message) => sanitize_error_message(&message),
        None => sanitize_error_message(body),
    }
}

/// Reads a `Retry-After` header expressed in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Result type alias for silk-studio operations.
pub type Result<T> = std::result::Result<T, SilkStudioError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

    #[test]
    fn test_user_message_no_image() {
        assert_eq!(
            SilkStudioError::NoImageGenerated.user_message(),
            "No image was generated. Please try again."
        );
        assert_eq!(
            SilkStudioError::NoImageGenerated.to_string(),
            NO_IMAGE_MESSAGE
        );
    }

    #[test]
    fn test_user_message_uses_service_text() {
        let err = SilkStudioError::RateLimited {
            retry_after: None,
            message: "quota exceeded".into(),
        };
        assert_eq!(err.user_message(), "quota exceeded");

        let err = SilkStudioError::Api {
            status: 500,
            message: "backend unavailable".into(),
        };
        assert_eq!(err.user_message(), "backend unavailable");
    }

    #[test]
    fn test_user_message_fallback_when_blank() {
        let err = SilkStudioError::Api {
            status: 500,
            message: "   ".into(),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            SilkStudioError::Auth(String::new()).user_message(),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_error_display() {
        let err = SilkStudioError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = SilkStudioError::ContentBlocked("Safety filter triggered".into());
        assert_eq!(err.to_string(), "content blocked: Safety filter triggered");
    }

    #[test]
    fn test_sanitize_collapses_and_truncates() {
        assert_eq!(sanitize_error_message("  bad \n\t request "), "bad request");

        let long = "x".repeat(MAX_MESSAGE_LEN + 20);
        let sanitized = sanitize_error_message(&long);
        assert_eq!(sanitized.len(), MAX_MESSAGE_LEN + 3);
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn test_service_error_message() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(service_error_message(body), "quota exceeded");
        assert_eq!(service_error_message("upstream timeout"), "upstream timeout");
        assert_eq!(service_error_message(r#"{"error":{}}"#), r#"{"error":{}}"#);
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert_eq!(parse_retry_after(&headers), Some(30));

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }
}
