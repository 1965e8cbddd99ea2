//! Address lookup.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::coordinate::Coordinate;

/// Default Nominatim endpoint
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
/// Environment variable overriding the geocoder base URL
pub const ENV_GEOCODER_URL: &str = "FIELDOPS_GEOCODER_URL";
/// Environment variable overriding the geocoder `User-Agent`
pub const ENV_GEOCODER_USER_AGENT: &str = "FIELDOPS_GEOCODER_USER_AGENT";
/// `User-Agent` sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("fieldops-territory-coverage/", env!("CARGO_PKG_VERSION"));

const BODY_SNIPPET_LIMIT: usize = 400;

/// Failures resolving an address to a coordinate
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Address was empty or whitespace; no lookup was made
    #[error("address is empty")]
    EmptyAddress,

    /// Lookup succeeded but returned no candidates
    #[error("no geocoding results for '{query}'")]
    NoResults {
        /// The query as sent
        query: String,
    },

    /// Lookup service answered with a non-success status
    #[error("geocoder returned {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Transport failure talking to the lookup service
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed payload or out-of-range coordinate
    #[error("could not parse geocoder response: {0}")]
    Parse(String),
}

/// Resolves free-text addresses to coordinates.
///
/// One call is one lookup; the first candidate wins.
pub trait Geocoder: Send + Sync {
    /// Geocode `address`.
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>>;
}

impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>> {
        (**self).geocode(address)
    }
}

/// Canonical form of a lookup query: trimmed, lowercased, inner whitespace collapsed.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
    country_codes: Option<String>,
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        let base_url = env_trimmed(ENV_GEOCODER_URL).unwrap_or_else(|| DEFAULT_GEOCODER_URL.into());
        let user_agent =
            env_trimmed(ENV_GEOCODER_USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.into());
        Self::with_base_url(base_url).with_user_agent(user_agent)
    }
}

impl NominatimGeocoder {
    /// Creates a geocoder using `FIELDOPS_GEOCODER_URL` / `FIELDOPS_GEOCODER_USER_AGENT`
    /// or the public Nominatim defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a geocoder for an explicit base URL, ignoring the environment.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            country_codes: None,
        }
    }

    /// Sets the `User-Agent` header (Nominatim's usage policy requires one)
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Restricts results to a comma-separated list of ISO country codes
    #[must_use]
    pub fn with_country_codes(mut self, codes: impl Into<String>) -> Self {
        let codes = codes.into();
        self.country_codes = (!codes.trim().is_empty()).then(|| codes.trim().to_string());
        self
    }

    /// Replaces the HTTP client
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn lookup(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodingError::EmptyAddress);
        }

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let mut params = vec![("q", query), ("format", "json"), ("limit", "1")];
        if let Some(cc) = self.country_codes.as_deref() {
            params.push(("countrycodes", cc));
        }

        tracing::debug!(query, "geocoding");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(GeocodingError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes[..bytes.len().min(BODY_SNIPPET_LIMIT)])
                    .into_owned(),
            });
        }

        let places: Vec<Place> =
            serde_json::from_slice(&bytes).map_err(|e| GeocodingError::Parse(e.to_string()))?;
        let place = places.into_iter().next().ok_or_else(|| GeocodingError::NoResults {
            query: query.to_string(),
        })?;
        place.coordinate()
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>> {
        Box::pin(self.lookup(address))
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: Value,
    lon: Value,
}

impl Place {
    fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        let lat = number_field("lat", &self.lat)?;
        let lon = number_field("lon", &self.lon)?;
        Coordinate::new(lat, lon).map_err(|e| GeocodingError::Parse(e.to_string()))
    }
}

// Nominatim sends coordinates as strings; some compatible servers send numbers.
fn number_field(name: &str, v: &Value) -> Result<f64, GeocodingError> {
    match v {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| GeocodingError::Parse(format!("{name} '{s}': {e}"))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| GeocodingError::Parse(format!("{name} {n} is not a float"))),
        other => Err(GeocodingError::Parse(format!("{name} has unexpected value {other}"))),
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_lowercases() {
        assert_eq!(normalize_query("  59101 "), "59101");
        assert_eq!(normalize_query("Billings,\t  MT"), "billings, mt");
    }

    #[test]
    fn place_accepts_string_and_number() {
        let p: Place = serde_json::from_str(r#"{"lat":"45.78","lon":-108.5}"#).unwrap();
        let c = p.coordinate().unwrap();
        assert!((c.latitude() - 45.78).abs() < 1e-9);
        assert!((c.longitude() + 108.5).abs() < 1e-9);
    }

    #[test]
    fn place_rejects_out_of_range() {
        let p: Place = serde_json::from_str(r#"{"lat":"95","lon":"0"}"#).unwrap();
        assert!(matches!(p.coordinate(), Err(GeocodingError::Parse(_))));
    }

    #[test]
    fn country_codes_blank_is_none() {
        let g = NominatimGeocoder::with_base_url("http://x").with_country_codes("  ");
        assert!(g.country_codes.is_none());
    }
}
