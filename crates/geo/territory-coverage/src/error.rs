use fieldops_async::FieldOpsError;
use thiserror::Error;

use crate::geocoder::GeocodingError;

/// Errors that abort a coverage or adjacency check
#[derive(Debug, Error)]
pub enum CoverageError {
    /// No REST credential configured; nothing was fetched
    #[error("missing FieldOps credential")]
    MissingCredential,

    /// The query address could not be geocoded
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    /// The territory endpoint answered with a non-success status
    #[error("territory fetch failed with {status}: {body}")]
    UpstreamApi {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Transport or decoding failure fetching territories
    #[error("territory fetch failed: {0}")]
    Fetch(String),

    /// Search radius outside `(0, 500]` miles
    #[error("radius must be greater than 0 and at most {max} miles, got {got}")]
    InvalidRadius {
        /// Requested radius
        got: f64,
        /// Upper bound
        max: f64,
    },
}

impl From<FieldOpsError> for CoverageError {
    fn from(e: FieldOpsError) -> Self {
        match e {
            FieldOpsError::MissingCredential => Self::MissingCredential,
            FieldOpsError::Api(obj) => Self::UpstreamApi {
                status: obj.status_code.unwrap_or_default(),
                body: obj.message,
            },
            other => Self::Fetch(other.to_string()),
        }
    }
}
