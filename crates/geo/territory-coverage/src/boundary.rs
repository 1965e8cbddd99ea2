//! Approximate territory shapes from postal codes and city names.
//!
//! Territories carry no geometry, so a boundary is rebuilt on every query by
//! geocoding a handful of the territory's identifiers:
//!
//! 1. up to [`SynthesisLimits::max_postal_codes`] postal codes, each success a vertex;
//! 2. if that yields fewer than three vertices, up to [`SynthesisLimits::max_cities`]
//!    cities as `"{city}, {state}"` (bare city when no state is known);
//! 3. with fewer than three vertices but a center, a square of
//!    `center ± fallback_half_extent_degrees`;
//! 4. otherwise nothing.
//!
//! The center is always the first point that geocoded. Individual lookup
//! failures are logged and skipped.

use serde::Serialize;

use crate::coordinate::Coordinate;
use crate::geocoder::Geocoder;
use fieldops_async::types::Territory;

/// Caps and sizes used while synthesizing a boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisLimits {
    /// Postal codes geocoded per territory
    pub max_postal_codes: usize,
    /// Cities geocoded per territory when postal codes fall short
    pub max_cities: usize,
    /// Half the side of the fallback square, in degrees
    pub fallback_half_extent_degrees: f64,
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        Self {
            max_postal_codes: 5,
            max_cities: 3,
            fallback_half_extent_degrees: 0.15,
        }
    }
}

/// How a boundary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySource {
    /// Three or more geocoded points used directly
    Geocoded,
    /// Square around the first geocoded point
    SquareFallback,
    /// Nothing geocoded; excluded from containment and distance
    Unresolved,
}

/// Approximate polygon for one territory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedBoundary {
    /// Ring of at least three vertices, absent when unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Coordinate>>,
    /// First successfully geocoded point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    /// How the vertices were obtained
    pub source: BoundarySource,
    /// Lookups that failed and were skipped
    pub failed_lookups: usize,
}

impl SynthesizedBoundary {
    /// Whether the boundary can be used for containment
    pub fn is_usable(&self) -> bool {
        self.vertex_count() >= 3
    }

    /// Number of vertices (zero when unresolved)
    pub fn vertex_count(&self) -> usize {
        self.vertices.as_ref().map_or(0, Vec::len)
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.vertices
            .as_deref()
            .is_some_and(|v| crate::polygon::contains(v, point))
    }
}

/// Builds [`SynthesizedBoundary`] values using a [`Geocoder`]
#[derive(Debug, Clone)]
pub struct BoundarySynthesizer<G> {
    geocoder: G,
    limits: SynthesisLimits,
}

impl<G: Geocoder> BoundarySynthesizer<G> {
    /// Synthesizer with default limits
    pub fn new(geocoder: G) -> Self {
        Self::with_limits(geocoder, SynthesisLimits::default())
    }

    /// Synthesizer with explicit limits
    pub const fn with_limits(geocoder: G, limits: SynthesisLimits) -> Self {
        Self { geocoder, limits }
    }

    /// The underlying geocoder
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Active limits
    pub const fn limits(&self) -> &SynthesisLimits {
        &self.limits
    }

    /// Builds the boundary for `territory`.
    pub async fn synthesize(&self, territory: &Territory) -> SynthesizedBoundary {
        let mut points = Vec::new();
        let mut failed = 0;

        for zip in self.postal_queries(territory) {
            self.collect(territory, zip, &mut points, &mut failed).await;
        }

        if points.len() < 3 {
            for query in self.city_queries(territory) {
                self.collect(territory, &query, &mut points, &mut failed).await;
            }
        }

        let center = points.first().copied();
        let boundary = if points.len() >= 3 {
            SynthesizedBoundary {
                vertices: Some(points),
                center,
                source: BoundarySource::Geocoded,
                failed_lookups: failed,
            }
        } else if let Some(c) = center {
            SynthesizedBoundary {
                vertices: Some(square_around(c, self.limits.fallback_half_extent_degrees)),
                center,
                source: BoundarySource::SquareFallback,
                failed_lookups: failed,
            }
        } else {
            SynthesizedBoundary {
                vertices: None,
                center: None,
                source: BoundarySource::Unresolved,
                failed_lookups: failed,
            }
        };

        tracing::debug!(
            territory = %territory.id,
            source = ?boundary.source,
            vertices = boundary.vertex_count(),
            failed_lookups = failed,
            "synthesized boundary"
        );
        boundary
    }

    /// Resolves only the territory's center: the first identifier that geocodes,
    /// in the same order [`synthesize`](Self::synthesize) tries them.
    pub async fn resolve_center(&self, territory: &Territory) -> Option<Coordinate> {
        let cities = self.city_queries(territory);
        let queries = self
            .postal_queries(territory)
            .map(str::to_string)
            .chain(cities);

        for query in queries {
            match self.geocoder.geocode(&query).await {
                Ok(c) => return Some(c),
                Err(e) => {
                    tracing::warn!(territory = %territory.id, query = %query, error = %e, "skipping territory point");
                }
            }
        }
        None
    }

    fn postal_queries<'t>(&self, territory: &'t Territory) -> impl Iterator<Item = &'t str> {
        territory
            .zip_codes
            .iter()
            .map(|z| z.trim())
            .filter(|z| !z.is_empty())
            .take(self.limits.max_postal_codes)
    }

    fn city_queries(&self, territory: &Territory) -> Vec<String> {
        let state = territory.primary_state();
        territory
            .cities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .take(self.limits.max_cities)
            .map(|city| match state {
                Some(state) => format!("{city}, {state}"),
                None => city.to_string(),
            })
            .collect()
    }

    async fn collect(
        &self,
        territory: &Territory,
        query: &str,
        points: &mut Vec<Coordinate>,
        failed: &mut usize,
    ) {
        match self.geocoder.geocode(query).await {
            Ok(c) => points.push(c),
            Err(e) => {
                *failed += 1;
                tracing::warn!(territory = %territory.id, query, error = %e, "skipping territory point");
            }
        }
    }
}

/// Four corners at `center ± d`, counter-clockwise from the south-west corner.
pub fn square_around(center: Coordinate, d: f64) -> Vec<Coordinate> {
    let (lat, lng) = (center.latitude(), center.longitude());
    vec![
        Coordinate::clamped(lat - d, lng - d),
        Coordinate::clamped(lat - d, lng + d),
        Coordinate::clamped(lat + d, lng + d),
        Coordinate::clamped(lat + d, lng - d),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticGeocoder;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn three_postal_codes_are_used_directly() {
        let g = StaticGeocoder::new()
            .with("59101", 45.78, -108.50)
            .with("59102", 45.77, -108.58)
            .with("59105", 45.83, -108.45);
        let t = Territory::new("t1", "Billings").with_zip_codes(["59101", "59102", "59105"]);

        let b = BoundarySynthesizer::new(&g).synthesize(&t).await;
        assert_eq!(b.source, BoundarySource::Geocoded);
        assert_eq!(b.vertex_count(), 3);
        let center = b.center.unwrap();
        assert!(approx(center.latitude(), 45.78));
        assert!(b.contains(&center));
    }

    #[tokio::test]
    async fn postal_codes_capped_at_five_and_cities_skipped() {
        let g = StaticGeocoder::new()
            .with("1", 1.0, 1.0)
            .with("2", 1.0, 2.0)
            .with("3", 2.0, 2.0)
            .with("4", 2.0, 1.0)
            .with("5", 1.5, 0.5)
            .with("6", 0.0, 0.0);
        let t = Territory::new("t", "T")
            .with_zip_codes(["1", "2", "3", "4", "5", "6"])
            .with_cities(["Nowhere"]);

        let b = BoundarySynthesizer::new(&g).synthesize(&t).await;
        assert_eq!(b.vertex_count(), 5);
        assert_eq!(g.calls(), vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn square_fallback_is_centered() {
        let g = StaticGeocoder::new().with("59101", 45.75, -108.5);
        let t = Territory::new("t", "T").with_zip_codes(["59101", "00000"]);

        let b = BoundarySynthesizer::new(&g).synthesize(&t).await;
        assert_eq!(b.source, BoundarySource::SquareFallback);
        assert_eq!(b.failed_lookups, 1);
        let v = b.vertices.as_ref().unwrap();
        assert_eq!(v.len(), 4);
        assert!(approx(v[0].latitude(), 45.60) && approx(v[0].longitude(), -108.65));
        assert!(approx(v[1].latitude(), 45.60) && approx(v[1].longitude(), -108.35));
        assert!(approx(v[2].latitude(), 45.90) && approx(v[2].longitude(), -108.35));
        assert!(approx(v[3].latitude(), 45.90) && approx(v[3].longitude(), -108.65));
        assert!(b.contains(&b.center.unwrap()));
    }

    #[tokio::test]
    async fn cities_use_first_state() {
        let g = StaticGeocoder::new()
            .with("Billings, MT", 45.78, -108.5)
            .with("Laurel, MT", 45.67, -108.77)
            .with("Lockwood, MT", 45.82, -108.41);
        let t = Territory::new("t", "T")
            .with_cities(["Billings", " ", "Laurel", "Lockwood", "Shepherd"])
            .with_states(["MT", "WY"]);

        let b = BoundarySynthesizer::new(&g).synthesize(&t).await;
        assert_eq!(b.source, BoundarySource::Geocoded);
        assert_eq!(g.calls(), vec!["billings, mt", "laurel, mt", "lockwood, mt"]);
    }

    #[tokio::test]
    async fn nothing_geocodes_means_unresolved() {
        let g = StaticGeocoder::new();
        let t = Territory::new("t", "T")
            .with_zip_codes(["11111"])
            .with_cities(["Atlantis"]);

        let b = BoundarySynthesizer::new(&g).synthesize(&t).await;
        assert_eq!(b.source, BoundarySource::Unresolved);
        assert!(b.vertices.is_none());
        assert!(b.center.is_none());
        assert_eq!(b.failed_lookups, 2);
        assert!(!b.is_usable());
    }

    #[tokio::test]
    async fn resolve_center_stops_at_first_hit() {
        let g = StaticGeocoder::new()
            .with("59102", 45.77, -108.58)
            .with("59105", 45.83, -108.45);
        let t = Territory::new("t", "T").with_zip_codes(["59101", "59102", "59105"]);

        let c = BoundarySynthesizer::new(&g).resolve_center(&t).await.unwrap();
        assert!(approx(c.latitude(), 45.77));
        assert_eq!(g.call_count(), 2);
    }

    #[test]
    fn custom_half_extent() {
        let c = Coordinate::new(10.0, 10.0).unwrap();
        let sq = square_around(c, 0.5);
        assert!(approx(sq[2].latitude(), 10.5));
        assert!(approx(sq[0].longitude(), 9.5));
    }
}
