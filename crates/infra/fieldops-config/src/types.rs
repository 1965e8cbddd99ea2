//! Configuration types.
//!
//! The root type is [`FieldOpsConfig`]: REST and geocoder endpoints, coverage
//! engine tuning, and logging.

use schemars::JsonSchema;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration loaded from `fieldops.json` files.
///
/// All fields use `#[serde(default)]` so partial configs work.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FieldOpsConfig {
    /// Optional JSON Schema URL for editor support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// External service endpoints.
    pub services: ServicesConfig,

    /// Coverage engine tuning.
    pub coverage: CoverageConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// External service configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServicesConfig {
    /// FieldOps REST API.
    pub api: ApiServiceConfig,

    /// Address geocoder.
    pub geocoder: GeocoderServiceConfig,
}

/// FieldOps REST API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiServiceConfig {
    /// Base URL for the REST API.
    pub base_url: String,

    /// Retry transient failures with exponential backoff. Off by default.
    pub retry: bool,

    /// Bearer credential (env-only, never serialized to config files).
    #[serde(skip)]
    #[schemars(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for ApiServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fieldops.app/v1".into(),
            retry: false,
            api_key: None,
        }
    }
}

/// Geocoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeocoderServiceConfig {
    /// Base URL of a Nominatim-compatible service.
    pub base_url: String,

    /// `User-Agent` sent with lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Comma-separated ISO country codes restricting results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<String>,

    /// Cache successful lookups for this many seconds. Absent disables caching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

impl Default for GeocoderServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".into(),
            user_agent: None,
            country_codes: None,
            cache_ttl_secs: None,
        }
    }
}

/// Coverage engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CoverageConfig {
    /// Territory boundaries synthesized concurrently.
    pub concurrency: usize,

    /// Postal codes geocoded per territory.
    pub max_postal_codes: usize,

    /// Cities geocoded per territory when postal codes fall short.
    pub max_cities: usize,

    /// Half the side of the fallback square, in degrees.
    pub fallback_half_extent_degrees: f64,

    /// Radius used by adjacency checks when none is given, in miles.
    pub default_radius_miles: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            max_postal_codes: 5,
            max_cities: 3,
            fallback_half_extent_degrees: 0.15,
            default_radius_miles: 50.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON-formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes_sections() {
        let json = serde_json::to_string_pretty(&FieldOpsConfig::default()).unwrap();
        assert!(json.contains("\"services\""));
        assert!(json.contains("\"coverage\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: FieldOpsConfig =
            serde_json::from_str(r#"{"coverage": {"concurrency": 4}}"#).unwrap();
        assert_eq!(config.coverage.concurrency, 4);
        assert_eq!(config.coverage.max_postal_codes, 5);
        assert!(!config.services.api.retry);
        assert_eq!(
            config.services.geocoder.base_url,
            "https://nominatim.openstreetmap.org"
        );
    }

    #[test]
    fn api_key_never_serialized() {
        let mut config = FieldOpsConfig::default();
        config.services.api.api_key = Some(SecretString::from("secret-key".to_string()));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn api_key_in_file_is_ignored() {
        let config: FieldOpsConfig =
            serde_json::from_str(r#"{"services": {"api": {"api_key": "from-file"}}}"#).unwrap();
        assert!(config.services.api.api_key.is_none());
    }
}
