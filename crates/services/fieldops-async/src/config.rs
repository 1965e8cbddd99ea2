use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default FieldOps API base URL
pub const FIELDOPS_DEFAULT_BASE: &str = "https://api.fieldops.app/v1";
/// Environment variable holding the bearer credential
pub const ENV_API_KEY: &str = "FIELDOPS_API_KEY";
/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "FIELDOPS_API_BASE_URL";

/// Configuration for the FieldOps client
///
/// Debug output automatically redacts the credential via [`SecretString`].
#[derive(Clone, Debug)]
pub struct FieldOpsConfig {
    api_base: String,
    api_key: Option<SecretString>,
}

impl Default for FieldOpsConfig {
    fn default() -> Self {
        let api_key = env_trimmed(ENV_API_KEY).map(SecretString::from);
        let api_base = env_trimmed(ENV_BASE_URL).unwrap_or_else(|| FIELDOPS_DEFAULT_BASE.into());

        Self { api_base, api_key }
    }
}

impl FieldOpsConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `FIELDOPS_API_KEY` for the bearer credential
    /// - `FIELDOPS_API_BASE_URL` for a custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that never consults the environment.
    ///
    /// Used when the credential is supplied per request (for example from a
    /// tool invocation context) and must not silently fall back to ambient state.
    #[must_use]
    pub fn detached(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: None,
        }
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the bearer credential
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets (or clears) the bearer credential from an already-wrapped secret
    #[must_use]
    pub fn with_credential(mut self, key: Option<SecretString>) -> Self {
        self.api_key = key;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the FieldOps client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::FieldOpsError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`FieldOpsError::MissingCredential`](crate::error::FieldOpsError::MissingCredential)
    /// if no usable credential is configured.
    fn validate_auth(&self) -> Result<(), crate::error::FieldOpsError>;
}

impl Config for FieldOpsConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::FieldOpsError> {
        use crate::error::FieldOpsError;

        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(secret) = &self.api_key {
            let key = secret.expose_secret().trim();
            if !key.is_empty() {
                let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|_| FieldOpsError::Config("Invalid authorization value".into()))?;
                value.set_sensitive(true);
                h.insert(AUTHORIZATION, value);
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn validate_auth(&self) -> Result<(), crate::error::FieldOpsError> {
        match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::FieldOpsError::MissingCredential),
        }
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
