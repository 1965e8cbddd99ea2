//! Territory coverage engine.
//!
//! Resolves a free-text address to a [`Coordinate`], approximates each
//! territory's shape from its postal codes and city names, and decides which
//! territory (if any) serves the address:
//!
//! - [`Geocoder`] / [`NominatimGeocoder`]: address lookup, with an opt-in
//!   [`CachedGeocoder`] wrapper
//! - [`BoundarySynthesizer`]: territory metadata to [`SynthesizedBoundary`]
//! - [`CoverageEvaluator`]: containment first, nearest center otherwise
//! - [`CoverageChecker`]: geocode, fetch, evaluate, assemble a [`CoverageResult`]
//! - [`AdjacencyFinder`]: territories whose center lies within a radius

pub mod adjacency;
pub mod boundary;
pub mod cache;
pub mod checker;
pub mod coordinate;
pub mod error;
pub mod evaluator;
pub mod geocoder;
pub mod polygon;
#[doc(hidden)]
pub mod test_support;

pub use adjacency::{
    AdjacencyFinder, AdjacencyReport, AdjacentTerritory, DEFAULT_RADIUS_MILES, MAX_RADIUS_MILES,
};
pub use boundary::{BoundarySource, BoundarySynthesizer, SynthesisLimits, SynthesizedBoundary};
pub use cache::CachedGeocoder;
pub use checker::{CoverageChecker, CoverageResult, CoverageStatus, TerritorySource};
pub use coordinate::{Coordinate, Distance, InvalidCoordinate, haversine_meters};
pub use error::CoverageError;
pub use evaluator::{
    ClosestTerritory, CoverageEvaluation, CoverageEvaluator, CoveringTerritory, ExaminedTerritory,
    TerritoryRef,
};
pub use geocoder::{Geocoder, GeocodingError, NominatimGeocoder, normalize_query};
pub use polygon::contains;

// Territory records come straight from the REST client.
pub use fieldops_async::types::Territory;
