//! FieldOps field-service operations as agent tools.
//!
//! [`FieldOpsTools`] holds the per-process settings (API base, shared
//! geocoder, coverage tuning); the REST client is built per call from the
//! credential in the [`ToolContext`]. [`build_registry`] wires every tool
//! into a [`fieldops_tool_core::ToolRegistry`].

#![warn(missing_docs)]

pub mod models;
pub mod tools;

use std::sync::Arc;
use std::time::Duration;

use fieldops_async::retry::default_backoff_builder;
use fieldops_async::types::AvailabilityQuery;
use fieldops_async::{Client, FieldOpsConfig as ClientConfig};
use fieldops_config::FieldOpsConfig;
use fieldops_tool_core::{ToolContext, ToolError};
use territory_coverage::{
    BoundarySynthesizer, CachedGeocoder, CoverageChecker, CoverageEvaluator, CoverageStatus,
    DEFAULT_RADIUS_MILES, Geocoder, NominatimGeocoder, SynthesisLimits,
};

use crate::models::{AdjacencyResult, AppointmentsResult, CoverageReport};
use crate::tools::{map_coverage_error, map_geocoding_error, map_rest_error};

pub use tools::build_registry;

/// REST client type the tools talk to.
pub type RestClient = Client<ClientConfig>;

/// Geocoder shared across calls (and across tools, so a cache is shared too).
pub type SharedGeocoder = Arc<dyn Geocoder>;

/// Settings and shared state behind every FieldOps tool.
#[derive(Clone)]
pub struct FieldOpsTools {
    api_base: String,
    retry: bool,
    geocoder: SharedGeocoder,
    limits: SynthesisLimits,
    concurrency: usize,
    default_radius_miles: f64,
}

impl std::fmt::Debug for FieldOpsTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldOpsTools")
            .field("api_base", &self.api_base)
            .field("retry", &self.retry)
            .field("limits", &self.limits)
            .field("concurrency", &self.concurrency)
            .field("default_radius_miles", &self.default_radius_miles)
            .finish_non_exhaustive()
    }
}

impl FieldOpsTools {
    /// Tools against `api_base` using `geocoder`, with default tuning.
    pub fn new(api_base: impl Into<String>, geocoder: impl Geocoder + 'static) -> Self {
        Self {
            api_base: api_base.into(),
            retry: false,
            geocoder: Arc::new(geocoder),
            limits: SynthesisLimits::default(),
            concurrency: 1,
            default_radius_miles: DEFAULT_RADIUS_MILES,
        }
    }

    /// Tools configured from a loaded configuration.
    ///
    /// A positive `cache_ttl_secs` wraps the geocoder in a [`CachedGeocoder`].
    pub fn from_config(config: &FieldOpsConfig) -> Self {
        let geo = &config.services.geocoder;
        let mut nominatim = NominatimGeocoder::with_base_url(geo.base_url.clone());
        if let Some(ua) = &geo.user_agent {
            nominatim = nominatim.with_user_agent(ua.clone());
        }
        if let Some(codes) = &geo.country_codes {
            nominatim = nominatim.with_country_codes(codes.clone());
        }

        let cov = &config.coverage;
        let limits = SynthesisLimits {
            max_postal_codes: cov.max_postal_codes,
            max_cities: cov.max_cities,
            fallback_half_extent_degrees: cov.fallback_half_extent_degrees,
        };

        let tools = match geo.cache_ttl_secs.filter(|s| *s > 0) {
            Some(secs) => Self::new(
                config.services.api.base_url.clone(),
                CachedGeocoder::with_ttl(nominatim, Duration::from_secs(secs)),
            ),
            None => Self::new(config.services.api.base_url.clone(), nominatim),
        };
        tools
            .with_retry(config.services.api.retry)
            .with_limits(limits)
            .with_concurrency(cov.concurrency)
            .with_default_radius_miles(cov.default_radius_miles)
    }

    /// Retries transient upstream failures with backoff when set.
    #[must_use]
    pub const fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    /// Caps applied while synthesizing territory boundaries.
    #[must_use]
    pub const fn with_limits(mut self, limits: SynthesisLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Boundary synthesis fan-out; values below 1 mean sequential.
    #[must_use]
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Radius used by the adjacency tool when the caller omits one.
    #[must_use]
    pub const fn with_default_radius_miles(mut self, miles: f64) -> Self {
        self.default_radius_miles = miles;
        self
    }

    /// Base URL of the FieldOps REST API.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Geocoder shared by every tool.
    pub const fn geocoder(&self) -> &SharedGeocoder {
        &self.geocoder
    }

    /// Fallback adjacency radius in miles.
    pub const fn default_radius_miles(&self) -> f64 {
        self.default_radius_miles
    }

    /// REST client bound to the caller's credential.
    ///
    /// Fails with `Permission` when the context carries no credential; nothing
    /// is sent in that case.
    pub fn client_for(&self, ctx: &ToolContext) -> Result<RestClient, ToolError> {
        let credential = ctx
            .credential_secret()
            .cloned()
            .ok_or_else(|| map_rest_error(fieldops_async::FieldOpsError::MissingCredential))?;
        let config = ClientConfig::detached(self.api_base.clone()).with_credential(Some(credential));
        let client = Client::with_config(config);
        Ok(if self.retry {
            client.with_backoff(default_backoff_builder())
        } else {
            client
        })
    }

    fn checker(&self, client: RestClient) -> CoverageChecker<SharedGeocoder, RestClient> {
        let synthesizer = BoundarySynthesizer::with_limits(Arc::clone(&self.geocoder), self.limits);
        let evaluator = CoverageEvaluator::new(synthesizer).with_concurrency(self.concurrency);
        CoverageChecker::with_evaluator(evaluator, client)
    }

    /// Is `address` inside an active territory, and if not, which is closest.
    pub async fn check_coverage(
        &self,
        client: RestClient,
        address: &str,
    ) -> Result<CoverageReport, ToolError> {
        let result = self
            .checker(client)
            .check(address)
            .await
            .map_err(map_coverage_error)?;

        match (&result.status, &result.covering_territory, &result.closest_territory) {
            (CoverageStatus::Covered, Some(cov), _) => tracing::info!(
                territory = %cov.territory.id,
                checked = result.territories_checked,
                "address covered"
            ),
            (_, _, Some(closest)) => tracing::info!(
                closest = %closest.territory.id,
                miles = closest.distance.miles,
                checked = result.territories_checked,
                "address not covered"
            ),
            _ => tracing::info!(checked = result.territories_checked, "address not covered, no territory located"),
        }
        Ok(CoverageReport(result))
    }

    /// Active territories whose center lies within `radius_miles` (or the
    /// configured default) of `address`.
    pub async fn adjacent_territories(
        &self,
        client: RestClient,
        address: &str,
        radius_miles: Option<f64>,
    ) -> Result<AdjacencyResult, ToolError> {
        let radius = radius_miles.unwrap_or(self.default_radius_miles);
        let (coordinate, report) = self
            .checker(client)
            .adjacent(address, radius)
            .await
            .map_err(map_coverage_error)?;
        Ok(AdjacencyResult {
            address: address.to_string(),
            coordinate,
            report,
        })
    }

    /// Geocodes `address` and lists open appointment slots near it.
    ///
    /// `build` receives the location and fills in the optional filters.
    pub async fn available_appointments(
        &self,
        client: RestClient,
        address: &str,
        build: impl FnOnce(AvailabilityQuery) -> AvailabilityQuery + Send,
    ) -> Result<AppointmentsResult, ToolError> {
        let coordinate = self
            .geocoder
            .geocode(address)
            .await
            .map_err(map_geocoding_error)?;
        let query = build(AvailabilityQuery::new(coordinate.latitude(), coordinate.longitude()));
        let slots = client
            .scheduling()
            .availability(&query)
            .await
            .map_err(map_rest_error)?;
        tracing::info!(slots = slots.len(), "availability fetched");
        Ok(AppointmentsResult {
            address: address.to_string(),
            coordinate,
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use territory_coverage::test_support::StaticGeocoder;

    #[test]
    fn client_requires_credential() {
        let tools = FieldOpsTools::new("http://127.0.0.1:9", StaticGeocoder::new());
        let err = tools.client_for(&ToolContext::new()).unwrap_err();
        assert!(matches!(err, ToolError::Permission(_)));
        assert!(tools.client_for(&ToolContext::with_credential("k")).is_ok());
    }

    #[test]
    fn from_config_applies_tuning() {
        let mut cfg = FieldOpsConfig::default();
        cfg.services.api.base_url = "https://api.example.test/v2".into();
        cfg.coverage.concurrency = 0;
        cfg.coverage.max_cities = 1;
        cfg.coverage.default_radius_miles = 25.0;
        cfg.services.geocoder.cache_ttl_secs = Some(60);

        let tools = FieldOpsTools::from_config(&cfg);
        assert_eq!(tools.api_base(), "https://api.example.test/v2");
        assert_eq!(tools.concurrency, 1);
        assert_eq!(tools.limits.max_cities, 1);
        assert!((tools.default_radius_miles() - 25.0).abs() < f64::EPSILON);
    }
}
