//! Advisory validation for [`FieldOpsConfig`].
//!
//! Validation produces warnings but never rejects a config.

use crate::types::FieldOpsConfig;

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Validate a configuration and return advisory warnings.
pub fn validate(cfg: &FieldOpsConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    validate_url(
        &cfg.services.api.base_url,
        "services.api.base_url",
        "services.api.base_url.invalid",
        &mut warnings,
    );
    validate_url(
        &cfg.services.geocoder.base_url,
        "services.geocoder.base_url",
        "services.geocoder.base_url.invalid",
        &mut warnings,
    );

    if cfg
        .services
        .geocoder
        .user_agent
        .as_deref()
        .is_some_and(|ua| ua.trim().is_empty())
    {
        warnings.push(AdvisoryWarning {
            code: "services.geocoder.user_agent.empty",
            path: "services.geocoder.user_agent",
            message: "Empty User-Agent; the default will be sent instead".into(),
        });
    }

    if cfg.services.geocoder.cache_ttl_secs == Some(0) {
        warnings.push(AdvisoryWarning {
            code: "services.geocoder.cache_ttl_secs.zero",
            path: "services.geocoder.cache_ttl_secs",
            message: "A zero TTL caches nothing; omit the field to disable caching".into(),
        });
    }

    let cov = &cfg.coverage;
    for (value, path, code) in [
        (cov.concurrency, "coverage.concurrency", "coverage.concurrency.zero"),
        (
            cov.max_postal_codes,
            "coverage.max_postal_codes",
            "coverage.max_postal_codes.zero",
        ),
        (cov.max_cities, "coverage.max_cities", "coverage.max_cities.zero"),
    ] {
        if value == 0 {
            warnings.push(AdvisoryWarning {
                code,
                path,
                message: "Value should be at least 1".into(),
            });
        }
    }

    if !(cov.fallback_half_extent_degrees.is_finite() && cov.fallback_half_extent_degrees > 0.0) {
        warnings.push(AdvisoryWarning {
            code: "coverage.fallback_half_extent_degrees.invalid",
            path: "coverage.fallback_half_extent_degrees",
            message: format!(
                "Expected a positive number of degrees, got {}",
                cov.fallback_half_extent_degrees
            ),
        });
    }

    if !(cov.default_radius_miles > 0.0 && cov.default_radius_miles <= 500.0) {
        warnings.push(AdvisoryWarning {
            code: "coverage.default_radius_miles.out_of_range",
            path: "coverage.default_radius_miles",
            message: format!(
                "Expected a radius in (0, 500] miles, got {}",
                cov.default_radius_miles
            ),
        });
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&cfg.logging.level.to_lowercase().as_str()) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            path: "logging.level",
            message: format!(
                "Unknown log level '{}'. Expected one of: {}",
                cfg.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    warnings
}

fn validate_url(
    url: &str,
    path: &'static str,
    code: &'static str,
    warnings: &mut Vec<AdvisoryWarning>,
) {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        warnings.push(AdvisoryWarning {
            code,
            path,
            message: format!("Expected an http(s) URL, got: '{url}'"),
        });
    }
}
