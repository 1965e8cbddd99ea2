//! Per-request tool context.

use secrecy::{ExposeSecret, SecretString};

/// Session object created once per tool request.
///
/// Carries the caller's REST credential explicitly; nothing is read from
/// process-global state. `Debug` output redacts the credential.
#[derive(Clone, Default, Debug)]
pub struct ToolContext {
    credential: Option<SecretString>,
    request_id: Option<String>,
}

impl ToolContext {
    /// Context without a credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying `credential`.
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self::new().credential(Some(SecretString::from(credential.into())))
    }

    /// Sets or clears the credential.
    #[must_use]
    pub fn credential(mut self, credential: Option<SecretString>) -> Self {
        self.credential = credential;
        self
    }

    /// Tags the context with a caller-supplied request id for log correlation.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// The credential, if present and not blank.
    pub fn credential_secret(&self) -> Option<&SecretString> {
        self.credential
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// Request id, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
