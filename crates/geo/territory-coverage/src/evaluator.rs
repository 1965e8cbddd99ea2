use std::pin::pin;

use futures::StreamExt;
use serde::Serialize;

use crate::boundary::{BoundarySource, BoundarySynthesizer, SynthesizedBoundary};
use crate::coordinate::{Coordinate, Distance};
use crate::geocoder::Geocoder;
use fieldops_async::types::Territory;

/// Identifier and display name of a territory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerritoryRef {
    /// Territory identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl From<&Territory> for TerritoryRef {
    fn from(t: &Territory) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
        }
    }
}

/// The territory whose boundary contains the query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoveringTerritory {
    /// The matching territory
    pub territory: Territory,
    /// Its synthesized boundary
    pub boundary: SynthesizedBoundary,
}

/// Nearest territory center when nothing contains the point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestTerritory {
    /// The nearest territory
    pub territory: Territory,
    /// Its center
    pub center: Coordinate,
    /// Great-circle distance from the query point to `center`
    pub distance: Distance,
}

/// Diagnostics for one territory visited during evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExaminedTerritory {
    /// Territory identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// How the boundary was obtained
    pub source: BoundarySource,
    /// Boundary vertex count
    pub vertex_count: usize,
    /// Whether the boundary contained the point
    pub contains_point: bool,
    /// Distance to the center, computed only for non-containing territories with a center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,
}

/// Outcome of evaluating one point against a territory list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageEvaluation {
    /// First territory (in list order) whose boundary contains the point
    pub covering: Option<CoveringTerritory>,
    /// Nearest center among examined territories, set only when nothing covers the point
    pub closest: Option<ClosestTerritory>,
    /// Territories visited, in list order
    pub examined: Vec<ExaminedTerritory>,
}

impl CoverageEvaluation {
    /// Whether a territory contains the point
    pub const fn is_covered(&self) -> bool {
        self.covering.is_some()
    }
}

/// Matches a point against synthesized territory boundaries.
///
/// Inactive territories are skipped. The first containing territory wins and
/// stops the scan; otherwise the nearest center is tracked, with ties going to
/// the earlier territory. With `concurrency > 1` up to that many boundaries are
/// synthesized ahead, but results are consumed in list order so the outcome is
/// the same as a sequential scan.
#[derive(Debug, Clone)]
pub struct CoverageEvaluator<G> {
    synthesizer: BoundarySynthesizer<G>,
    concurrency: usize,
}

impl<G: Geocoder> CoverageEvaluator<G> {
    /// Sequential evaluator
    pub const fn new(synthesizer: BoundarySynthesizer<G>) -> Self {
        Self {
            synthesizer,
            concurrency: 1,
        }
    }

    /// Sets how many boundaries may be synthesized concurrently (minimum 1)
    #[must_use]
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Configured concurrency
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// The boundary synthesizer
    pub const fn synthesizer(&self) -> &BoundarySynthesizer<G> {
        &self.synthesizer
    }

    /// Evaluates `point` against `territories`.
    pub async fn evaluate(&self, point: &Coordinate, territories: &[Territory]) -> CoverageEvaluation {
        let synth = &self.synthesizer;
        // Built before the first await so no borrowing closure lives inside the stream.
        let pending: Vec<_> = territories
            .iter()
            .filter(|t| t.active)
            .map(|t| async move { (t, synth.synthesize(t).await) })
            .collect();
        let mut boundaries = pin!(futures::stream::iter(pending).buffered(self.concurrency));

        let mut examined = Vec::new();
        let mut closest: Option<ClosestTerritory> = None;

        while let Some((territory, boundary)) = boundaries.next().await {
            let contains_point = boundary.contains(point);
            let mut entry = ExaminedTerritory {
                id: territory.id.clone(),
                name: territory.name.clone(),
                source: boundary.source,
                vertex_count: boundary.vertex_count(),
                contains_point,
                distance: None,
            };

            if contains_point {
                examined.push(entry);
                tracing::info!(territory = %territory.id, "point covered");
                return CoverageEvaluation {
                    covering: Some(CoveringTerritory {
                        territory: territory.clone(),
                        boundary,
                    }),
                    closest: None,
                    examined,
                };
            }

            match boundary.center {
                Some(center) => {
                    let distance = point.distance_to(&center);
                    entry.distance = Some(distance);
                    if closest
                        .as_ref()
                        .is_none_or(|c| distance.meters < c.distance.meters)
                    {
                        closest = Some(ClosestTerritory {
                            territory: territory.clone(),
                            center,
                            distance,
                        });
                    }
                }
                None => {
                    tracing::warn!(territory = %territory.id, "insufficient boundary data");
                }
            }
            examined.push(entry);
        }

        tracing::info!(
            closest = closest.as_ref().map(|c| c.territory.id.as_str()),
            examined = examined.len(),
            "point not covered"
        );
        CoverageEvaluation {
            covering: None,
            closest,
            examined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticGeocoder;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn geocoder() -> StaticGeocoder {
        StaticGeocoder::new()
            .with("a", 10.0, 10.0)
            .with("b", 20.0, 20.0)
            .with("c", 30.0, 30.0)
    }

    #[tokio::test]
    async fn first_containing_territory_wins_and_stops() {
        let g = geocoder();
        let territories = vec![
            Territory::new("1", "One").with_zip_codes(["a"]),
            Territory::new("2", "Two").with_zip_codes(["a"]),
            Territory::new("3", "Three").with_zip_codes(["b"]),
        ];
        let eval = CoverageEvaluator::new(BoundarySynthesizer::new(&g));
        let out = eval.evaluate(&c(10.0, 10.0), &territories).await;

        assert_eq!(out.covering.unwrap().territory.id, "1");
        assert_eq!(out.examined.len(), 1);
        assert_eq!(g.call_count(), 1);
    }

    #[tokio::test]
    async fn closest_tie_keeps_earlier() {
        let g = geocoder();
        let territories = vec![
            Territory::new("far", "Far").with_zip_codes(["c"]),
            Territory::new("b1", "B1").with_zip_codes(["b"]),
            Territory::new("b2", "B2").with_zip_codes(["b"]),
        ];
        let eval = CoverageEvaluator::new(BoundarySynthesizer::new(&g));
        let out = eval.evaluate(&c(0.0, 0.0), &territories).await;

        assert!(!out.is_covered());
        assert_eq!(out.closest.unwrap().territory.id, "b1");
        assert_eq!(out.examined.len(), 3);
        assert!(out.examined.iter().all(|e| e.distance.is_some()));
    }

    #[tokio::test]
    async fn inactive_and_unresolved_are_skipped() {
        let g = geocoder();
        let territories = vec![
            Territory::new("off", "Off").with_zip_codes(["a"]).with_active(false),
            Territory::new("ghost", "Ghost").with_zip_codes(["zzz"]),
        ];
        let eval = CoverageEvaluator::new(BoundarySynthesizer::new(&g));
        let out = eval.evaluate(&c(10.0, 10.0), &territories).await;

        assert!(out.covering.is_none());
        assert!(out.closest.is_none());
        assert_eq!(out.examined.len(), 1);
        assert_eq!(out.examined[0].source, BoundarySource::Unresolved);
    }

    #[tokio::test]
    async fn concurrent_run_matches_sequential() {
        let g = geocoder();
        let territories = vec![
            Territory::new("1", "One").with_zip_codes(["c"]),
            Territory::new("2", "Two").with_zip_codes(["b"]),
            Territory::new("3", "Three").with_zip_codes(["b"]),
            Territory::new("4", "Four").with_zip_codes(["zzz"]),
        ];
        let point = c(19.0, 19.0);

        let sequential = CoverageEvaluator::new(BoundarySynthesizer::new(&g))
            .evaluate(&point, &territories)
            .await;
        let concurrent = CoverageEvaluator::new(BoundarySynthesizer::new(&g))
            .with_concurrency(4)
            .evaluate(&point, &territories)
            .await;

        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent.closest.unwrap().territory.id, "2");
    }

    #[test]
    fn concurrency_floor_is_one() {
        let g = geocoder();
        let eval = CoverageEvaluator::new(BoundarySynthesizer::new(&g)).with_concurrency(0);
        assert_eq!(eval.concurrency(), 1);
    }
}
