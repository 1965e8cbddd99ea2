//! Result envelope returned by [`ToolRegistry::dispatch`](crate::ToolRegistry::dispatch).

use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::registry::FormattedResult;

/// Either a successful result or an error-flagged message, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Structured data plus its text rendering.
    Success {
        /// JSON result
        data: Value,
        /// Human-readable rendering of `data`
        text: String,
    },
    /// Human-readable failure.
    Error {
        /// Error kind (see [`ToolError::kind`])
        kind: &'static str,
        /// Message
        message: String,
    },
}

impl ToolOutcome {
    /// Whether this is an error outcome.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Text shown to the caller: the rendering on success, the message on error.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text, .. } => text,
            Self::Error { message, .. } => message,
        }
    }
}

impl From<Result<FormattedResult, ToolError>> for ToolOutcome {
    fn from(r: Result<FormattedResult, ToolError>) -> Self {
        match r {
            Ok(FormattedResult { data, text }) => Self::Success { data, text },
            Err(e) => Self::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_outcome_serializes_flagged() {
        let out = ToolOutcome::from(Err(ToolError::permission("missing credential")));
        assert!(out.is_error());
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            serde_json::json!({
                "status": "error",
                "kind": "permission",
                "message": "permission denied: missing credential"
            })
        );
    }

    #[test]
    fn success_outcome_has_text() {
        let out = ToolOutcome::from(Ok(FormattedResult {
            data: serde_json::json!({"ok": true}),
            text: "ok".into(),
        }));
        assert!(!out.is_error());
        assert_eq!(out.text(), "ok");
    }
}
