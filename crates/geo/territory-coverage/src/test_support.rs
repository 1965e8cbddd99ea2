//! In-memory fakes for the geocoder and territory source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;

use crate::checker::TerritorySource;
use crate::coordinate::Coordinate;
use crate::error::CoverageError;
use crate::geocoder::{Geocoder, GeocodingError, normalize_query};
use fieldops_async::types::Territory;

/// Geocoder answering from a fixed table; unknown queries yield `NoResults`.
///
/// Every call is recorded (normalized) so tests can assert on lookup order.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    table: HashMap<String, Coordinate>,
    calls: Mutex<Vec<String>>,
}

impl StaticGeocoder {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry; panics on an invalid coordinate since this is test-only data
    #[must_use]
    #[expect(clippy::expect_used, reason = "test fixture data")]
    pub fn with(mut self, query: &str, latitude: f64, longitude: f64) -> Self {
        let coord = Coordinate::new(latitude, longitude).expect("valid fixture coordinate");
        self.table.insert(normalize_query(query), coord);
        self
    }

    /// Queries seen so far, normalized, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of lookups performed
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>> {
        Box::pin(async move {
            if address.trim().is_empty() {
                return Err(GeocodingError::EmptyAddress);
            }
            let key = normalize_query(address);
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(key.clone());
            self.table
                .get(&key)
                .copied()
                .ok_or(GeocodingError::NoResults { query: key })
        })
    }
}

/// Territory source serving a fixed list and counting fetches.
#[derive(Debug, Default)]
pub struct StaticTerritories {
    territories: Vec<Territory>,
    failure: Option<(u16, String)>,
    fetches: AtomicUsize,
}

impl StaticTerritories {
    /// Serves `territories` on every fetch
    pub fn new(territories: Vec<Territory>) -> Self {
        Self {
            territories,
            ..Self::default()
        }
    }

    /// Fails every fetch with an upstream status
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Some((status, body.into())),
            ..Self::default()
        }
    }

    /// Number of fetches served
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl TerritorySource for StaticTerritories {
    fn fetch_territories(&self) -> BoxFuture<'_, Result<Vec<Territory>, CoverageError>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some((status, body)) => Err(CoverageError::UpstreamApi {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(self.territories.clone()),
            }
        })
    }
}
