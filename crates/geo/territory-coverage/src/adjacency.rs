use serde::Serialize;

use crate::boundary::BoundarySynthesizer;
use crate::coordinate::{Coordinate, Distance};
use crate::error::CoverageError;
use crate::evaluator::TerritoryRef;
use crate::geocoder::Geocoder;
use fieldops_async::types::Territory;

/// Search radius used when the caller gives none
pub const DEFAULT_RADIUS_MILES: f64 = 50.0;
/// Largest accepted search radius
pub const MAX_RADIUS_MILES: f64 = 500.0;

/// A territory whose center is within the search radius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacentTerritory {
    /// The territory
    pub territory: Territory,
    /// Its resolved center
    pub center: Coordinate,
    /// Distance from the query point
    pub distance: Distance,
}

/// Result of an adjacency search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyReport {
    /// Radius searched, in miles
    pub radius_miles: f64,
    /// Matches, nearest first
    pub adjacent: Vec<AdjacentTerritory>,
    /// Active territories whose center could not be resolved
    pub unresolved: Vec<TerritoryRef>,
}

pub(crate) fn validate_radius(radius_miles: f64) -> Result<(), CoverageError> {
    if radius_miles.is_finite() && radius_miles > 0.0 && radius_miles <= MAX_RADIUS_MILES {
        Ok(())
    } else {
        Err(CoverageError::InvalidRadius {
            got: radius_miles,
            max: MAX_RADIUS_MILES,
        })
    }
}

/// Lists territories near a point by center distance. No polygons are built.
pub struct AdjacencyFinder<'s, G> {
    synthesizer: &'s BoundarySynthesizer<G>,
}

impl<'s, G: Geocoder> AdjacencyFinder<'s, G> {
    /// Finder resolving centers with `synthesizer`
    pub const fn new(synthesizer: &'s BoundarySynthesizer<G>) -> Self {
        Self { synthesizer }
    }

    /// Active territories within `radius_miles` of `point`, nearest first.
    pub async fn find(
        &self,
        point: &Coordinate,
        territories: &[Territory],
        radius_miles: f64,
    ) -> Result<AdjacencyReport, CoverageError> {
        validate_radius(radius_miles)?;

        let mut adjacent = Vec::new();
        let mut unresolved = Vec::new();

        for territory in territories.iter().filter(|t| t.active) {
            let Some(center) = self.synthesizer.resolve_center(territory).await else {
                tracing::warn!(territory = %territory.id, "territory center unresolved");
                unresolved.push(TerritoryRef::from(territory));
                continue;
            };
            let distance = point.distance_to(&center);
            if distance.miles <= radius_miles {
                adjacent.push(AdjacentTerritory {
                    territory: territory.clone(),
                    center,
                    distance,
                });
            }
        }

        adjacent.sort_by(|a, b| a.distance.meters.total_cmp(&b.distance.meters));
        tracing::info!(radius_miles, found = adjacent.len(), "adjacency search");

        Ok(AdjacencyReport {
            radius_miles,
            adjacent,
            unresolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticGeocoder;

    #[test]
    fn radius_bounds() {
        assert!(validate_radius(50.0).is_ok());
        assert!(validate_radius(500.0).is_ok());
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-1.0).is_err());
        assert!(validate_radius(500.1).is_err());
        assert!(validate_radius(f64::NAN).is_err());
    }

    #[tokio::test]
    async fn sorted_nearest_first_with_unresolved() {
        let g = StaticGeocoder::new()
            .with("laurel", 45.67, -108.77)
            .with("billings", 45.78, -108.50)
            .with("bozeman", 45.68, -111.04)
            .with("denver", 39.74, -104.99);
        let territories = vec![
            Territory::new("boz", "Bozeman").with_cities(["bozeman"]),
            Territory::new("lau", "Laurel").with_cities(["laurel"]),
            Territory::new("den", "Denver").with_cities(["denver"]),
            Territory::new("bil", "Billings").with_cities(["billings"]),
            Territory::new("off", "Off").with_cities(["billings"]).with_active(false),
            Territory::new("x", "Unknown").with_zip_codes(["99999"]),
        ];
        let point = Coordinate::new(45.78, -108.50).unwrap();
        let synth = BoundarySynthesizer::new(&g);

        let report = AdjacencyFinder::new(&synth)
            .find(&point, &territories, DEFAULT_RADIUS_MILES)
            .await
            .unwrap();

        let ids: Vec<_> = report.adjacent.iter().map(|a| a.territory.id.as_str()).collect();
        assert_eq!(ids, vec!["bil", "lau"]);
        assert!(report.adjacent[0].distance.meters.abs() < 1e-6);
        assert_eq!(report.unresolved, vec![TerritoryRef { id: "x".into(), name: "Unknown".into() }]);

        let wide = AdjacencyFinder::new(&synth)
            .find(&point, &territories, 200.0)
            .await
            .unwrap();
        let ids: Vec<_> = wide.adjacent.iter().map(|a| a.territory.id.as_str()).collect();
        assert_eq!(ids, vec!["bil", "lau", "boz"]);
    }
}
