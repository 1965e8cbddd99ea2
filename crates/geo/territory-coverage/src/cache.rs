//! Opt-in TTL cache in front of any [`Geocoder`].

use std::collections::HashMap;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::coordinate::Coordinate;
use crate::geocoder::{Geocoder, GeocodingError, normalize_query};

/// Default lifetime of a cached lookup
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Caches successful lookups keyed by [`normalize_query`].
///
/// Failures are never cached. Expired entries are swept whenever a fresh
/// result is stored, so the map only outgrows the live set between misses.
pub struct CachedGeocoder<G> {
    inner: G,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Coordinate, Instant)>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Wraps `inner` with the default TTL
    pub fn new(inner: G) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    /// Wraps `inner` with an explicit TTL
    pub fn with_ttl(inner: G, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped geocoder
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of entries currently held, including any expired since the last sweep
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drops every entry
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    async fn lookup(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        let key = normalize_query(address);
        if key.is_empty() {
            return Err(GeocodingError::EmptyAddress);
        }

        {
            let entries = self.entries.lock().await;
            if let Some((coord, stored)) = entries.get(&key)
                && stored.elapsed() < self.ttl
            {
                tracing::debug!(query = %key, "geocode cache hit");
                return Ok(*coord);
            }
        }

        let coord = self.inner.geocode(address).await?;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, (_, stored)| stored.elapsed() < self.ttl);
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!(swept, "evicted expired geocode entries");
        }
        entries.insert(key, (coord, Instant::now()));
        drop(entries);
        Ok(coord)
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinate, GeocodingError>> {
        Box::pin(self.lookup(address))
    }
}
