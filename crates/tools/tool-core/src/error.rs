//! Tool error type.

use thiserror::Error;

/// Error returned by tool operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments failed to parse or validate.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure inside the tool itself.
    #[error("internal error: {0}")]
    Internal(String),

    /// Failure reported by an upstream service.
    #[error("external service error: {0}")]
    External(String),

    /// Missing or rejected credential.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create an invalid input error.
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        Self::InvalidInput(s.to_string())
    }

    /// Create an internal error.
    pub fn internal<S: ToString>(s: S) -> Self {
        Self::Internal(s.to_string())
    }

    /// Create an external service error.
    pub fn external<S: ToString>(s: S) -> Self {
        Self::External(s.to_string())
    }

    /// Create a not found error.
    pub fn not_found<S: ToString>(s: S) -> Self {
        Self::NotFound(s.to_string())
    }

    /// Create a permission denied error.
    pub fn permission<S: ToString>(s: S) -> Self {
        Self::Permission(s.to_string())
    }

    /// Stable machine-readable kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
            Self::External(_) => "external",
            Self::Permission(_) => "permission",
            Self::NotFound(_) => "not_found",
        }
    }
}
