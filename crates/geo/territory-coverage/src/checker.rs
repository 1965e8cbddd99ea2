use futures::future::BoxFuture;
use serde::Serialize;

use crate::adjacency::{AdjacencyFinder, AdjacencyReport};
use crate::boundary::BoundarySynthesizer;
use crate::coordinate::Coordinate;
use crate::error::CoverageError;
use crate::evaluator::{ClosestTerritory, CoverageEvaluator, CoveringTerritory, ExaminedTerritory};
use crate::geocoder::Geocoder;
use fieldops_async::Client;
use fieldops_async::config::Config;
use fieldops_async::types::Territory;

/// Supplies the current territory list
pub trait TerritorySource: Send + Sync {
    /// Fetches every territory
    fn fetch_territories(&self) -> BoxFuture<'_, Result<Vec<Territory>, CoverageError>>;
}

impl<C: Config> TerritorySource for Client<C> {
    fn fetch_territories(&self) -> BoxFuture<'_, Result<Vec<Territory>, CoverageError>> {
        Box::pin(async move { Ok(self.territories().list_all().await?) })
    }
}

impl<S: TerritorySource + ?Sized> TerritorySource for &S {
    fn fetch_territories(&self) -> BoxFuture<'_, Result<Vec<Territory>, CoverageError>> {
        (**self).fetch_territories()
    }
}

/// Whether an address is inside a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Inside an active territory
    Covered,
    /// Outside every active territory
    NotCovered,
}

/// Full answer to a coverage check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    /// Address as supplied
    pub address: String,
    /// Where the address geocoded to
    pub coordinate: Coordinate,
    /// Covered or not
    pub status: CoverageStatus,
    /// Territory containing the address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering_territory: Option<CoveringTerritory>,
    /// Nearest territory when not covered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_territory: Option<ClosestTerritory>,
    /// Territories returned by the source
    pub total_territories: usize,
    /// Active territories among them
    pub active_territories: usize,
    /// Number of territories actually evaluated
    pub territories_checked: usize,
    /// Per-territory diagnostics, in evaluation order
    pub examined: Vec<ExaminedTerritory>,
}

/// End-to-end coverage and adjacency checks: geocode, fetch, evaluate.
///
/// A failed address lookup aborts before territories are fetched.
pub struct CoverageChecker<G, S> {
    evaluator: CoverageEvaluator<G>,
    source: S,
}

impl<G: Geocoder, S: TerritorySource> CoverageChecker<G, S> {
    /// Checker with default synthesis limits and sequential evaluation
    pub fn new(geocoder: G, source: S) -> Self {
        Self::with_evaluator(CoverageEvaluator::new(BoundarySynthesizer::new(geocoder)), source)
    }

    /// Checker with a preconfigured evaluator
    pub const fn with_evaluator(evaluator: CoverageEvaluator<G>, source: S) -> Self {
        Self { evaluator, source }
    }

    /// The evaluator in use
    pub const fn evaluator(&self) -> &CoverageEvaluator<G> {
        &self.evaluator
    }

    fn geocoder(&self) -> &G {
        self.evaluator.synthesizer().geocoder()
    }

    /// Geocodes `address` and resolves it to a point
    pub async fn locate(&self, address: &str) -> Result<Coordinate, CoverageError> {
        Ok(self.geocoder().geocode(address).await?)
    }

    /// Runs a coverage check for `address`.
    pub async fn check(&self, address: &str) -> Result<CoverageResult, CoverageError> {
        let coordinate = self.locate(address).await?;
        let territories = self.source.fetch_territories().await?;
        let active = territories.iter().filter(|t| t.active).count();

        let evaluation = self.evaluator.evaluate(&coordinate, &territories).await;
        let status = if evaluation.is_covered() {
            CoverageStatus::Covered
        } else {
            CoverageStatus::NotCovered
        };

        Ok(CoverageResult {
            address: address.to_string(),
            coordinate,
            status,
            covering_territory: evaluation.covering,
            closest_territory: evaluation.closest,
            total_territories: territories.len(),
            active_territories: active,
            territories_checked: evaluation.examined.len(),
            examined: evaluation.examined,
        })
    }

    /// Finds active territories whose center lies within `radius_miles` of `address`.
    ///
    /// The radius is validated before any lookup.
    pub async fn adjacent(
        &self,
        address: &str,
        radius_miles: f64,
    ) -> Result<(Coordinate, AdjacencyReport), CoverageError> {
        crate::adjacency::validate_radius(radius_miles)?;
        let coordinate = self.locate(address).await?;
        let territories = self.source.fetch_territories().await?;

        let finder = AdjacencyFinder::new(self.evaluator.synthesizer());
        let report = finder.find(&coordinate, &territories, radius_miles).await?;
        Ok((coordinate, report))
    }
}
