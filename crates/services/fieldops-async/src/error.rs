use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of body bytes kept in error messages
const BODY_SNIPPET_LIMIT: usize = 400;

/// Errors that can occur when using the FieldOps API client
#[derive(Debug, Error)]
pub enum FieldOpsError {
    /// No bearer credential was configured; no request was sent
    #[error("Missing FieldOps credential: set FIELDOPS_API_KEY or pass a credential explicitly")]
    MissingCredential,

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status returned by the FieldOps API
    #[error("API error {}: {}", .0.status_code.unwrap_or_default(), .0.message)]
    Api(ApiErrorObject),

    /// Configuration error (e.g., malformed header value)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// API error object from FieldOps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message (or the raw body text)
    #[serde(default, alias = "error_description", alias = "detail")]
    pub message: String,
    /// Machine-readable error code
    #[serde(default, alias = "error")]
    pub code: Option<String>,
}

impl FieldOpsError {
    /// Determines if this error is retryable
    ///
    /// Retryable errors include rate limits (429), timeouts (408), conflicts (409),
    /// server errors (5xx), and connect/timeout transport failures.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => obj
                .status_code
                .is_some_and(crate::retry::is_retryable_status),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::MissingCredential | Self::Config(_) | Self::Serde(_) => false,
        }
    }

    /// Returns the HTTP status code for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn snippet(body: &[u8]) -> String {
    let end = body.len().min(BODY_SNIPPET_LIMIT);
    let mut text = String::from_utf8_lossy(&body[..end]).into_owned();
    cap_at_char_boundary(&mut text);
    text
}

// A lossy decode can widen a split trailing byte into U+FFFD.
fn cap_at_char_boundary(text: &mut String) {
    if text.len() <= BODY_SNIPPET_LIMIT {
        return;
    }
    let mut end = BODY_SNIPPET_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// Maps a serde deserialization error to a `FieldOpsError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> FieldOpsError {
    FieldOpsError::Serde(format!("{e}: {}", snippet(body)))
}

/// Deserializes an API error from the response body
///
/// Attempts to parse the error as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> FieldOpsError {
    let status_code = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body)
        && !obj.message.is_empty()
    {
        obj.status_code = status_code;
        cap_at_char_boundary(&mut obj.message);
        return FieldOpsError::Api(obj);
    }

    FieldOpsError::Api(ApiErrorObject {
        status_code,
        message: snippet(body),
        code: Some(format!("http_{}", status.as_u16())),
    })
}
