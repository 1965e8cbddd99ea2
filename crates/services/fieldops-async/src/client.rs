use backon::{ExponentialBuilder, Retryable};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::{Config, FieldOpsConfig},
    error::FieldOpsError,
};

/// HTTP method accepted by [`Client::request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// FieldOps API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration. Requests are attempted once; call [`Client::with_backoff`]
/// to opt into retries.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: Option<ExponentialBuilder>,
}

impl Client<FieldOpsConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication:
    /// - `FIELDOPS_API_KEY` for the bearer credential
    /// - `FIELDOPS_API_BASE_URL` for a custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FieldOpsConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("fieldops-async/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            config,
            backoff: None,
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Enables retries with the given backoff configuration
    ///
    /// See [`crate::retry::default_backoff_builder`] for the recommended policy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Sends a raw request and returns the decoded JSON body.
    ///
    /// This is the untyped escape hatch behind every resource: `endpoint` is
    /// joined onto the configured base URL, `body` (if any) is sent as JSON.
    /// An empty success body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldOpsError::MissingCredential`] before any network traffic if no
    /// credential is configured, [`FieldOpsError::Api`] on a non-success status, and
    /// transport or decoding errors otherwise.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, FieldOpsError> {
        self.config.validate_auth()?;

        let mk = || async {
            let headers = self.config.headers()?;
            let mut req = self
                .http
                .request(method.into(), self.config.url(endpoint))
                .headers(headers);
            if let Some(body) = body {
                req = req.json(body);
            }
            Ok(req.build()?)
        };

        let bytes = self.execute_raw(mk).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    pub(crate) async fn get<O>(&self, path: &str, query: &[(&str, String)]) -> Result<O, FieldOpsError>
    where
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(query)
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: I) -> Result<O, FieldOpsError>
    where
        I: Serialize + Send + Sync,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .post(self.config.url(path))
                .headers(headers)
                .json(&body)
                .build()?)
        };
        self.execute(mk).await
    }

    async fn execute<O, M, Fut>(&self, mk: M) -> Result<O, FieldOpsError>
    where
        O: DeserializeOwned,
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, FieldOpsError>> + Send,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let bytes = self.execute_raw(mk).await?;
        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }

    async fn execute_raw<M, Fut>(&self, mk: M) -> Result<bytes::Bytes, FieldOpsError>
    where
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, FieldOpsError>> + Send,
    {
        let http_client = self.http.clone();

        let attempt = || async {
            let request = mk().await?;
            tracing::debug!(method = %request.method(), url = %request.url(), "fieldops request");
            let response = http_client
                .execute(request)
                .await
                .map_err(FieldOpsError::Reqwest)?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(FieldOpsError::Reqwest)?;

            if status.is_success() {
                return Ok(bytes);
            }

            Err(crate::error::deserialize_api_error(status, &bytes))
        };

        match self.backoff {
            Some(backoff) => {
                attempt
                    .retry(backoff)
                    .when(FieldOpsError::is_retryable)
                    .notify(|err: &FieldOpsError, dur: std::time::Duration| {
                        tracing::debug!(error = %err, delay_ms = dur.as_millis(), "retrying fieldops request");
                    })
                    .await
            }
            None => attempt().await,
        }
    }
}
