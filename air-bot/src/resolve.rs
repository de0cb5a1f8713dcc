//! Free-text → city name resolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::fuzzy;
use crate::gios::GiosError;
use crate::stations::{DirectorySnapshot, StationDirectory};

/// Minimum score (exclusive) for a fuzzy match to be accepted.
pub const MIN_SCORE: u8 = 65;

/// Resolves user input to a city known to the station directory.
///
/// Results, including failed lookups, are cached per input until the
/// directory is refreshed.
pub struct CityResolver {
    directory: Arc<StationDirectory>,
    /// (directory generation, input text) → resolved city.
    ///
    /// A result computed against an older snapshot lands under that
    /// snapshot's generation and is never looked up again.
    cache: MokaCache<(u64, String), Option<String>>,
    /// Newest directory generation seen so far.
    generation: AtomicU64,
}

impl CityResolver {
    pub fn new(directory: Arc<StationDirectory>, max_capacity: u64) -> Self {
        Self {
            directory,
            cache: MokaCache::builder().max_capacity(max_capacity).build(),
            generation: AtomicU64::new(0),
        }
    }

    /// Resolve free text to the closest known city name.
    ///
    /// Refreshes the directory first if it is stale. Returns `Ok(None)` if no
    /// city scores above the threshold.
    pub async fn resolve(&self, text: &str) -> Result<Option<String>, GiosError> {
        let snapshot = self.directory.refresh().await?;
        Ok(self.resolve_in(&snapshot, text).await)
    }

    /// Resolve against one snapshot. Concurrent misses for the same input
    /// and generation share one match.
    async fn resolve_in(&self, snapshot: &DirectorySnapshot, text: &str) -> Option<String> {
        let generation = snapshot.generation();

        let seen = self.generation.fetch_max(generation, Ordering::AcqRel);
        if seen < generation {
            debug!(
                from = seen,
                to = generation,
                "directory changed, clearing resolved cities"
            );
            self.cache.invalidate_all();
        }

        self.cache
            .get_with((generation, text.to_string()), async {
                best_city(snapshot, text)
            })
            .await
    }

    /// Number of cached resolutions.
    #[cfg(test)]
    pub fn cached_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

fn best_city(snapshot: &DirectorySnapshot, text: &str) -> Option<String> {
    let candidates = snapshot.cities().iter().map(String::as_str);
    match fuzzy::best_match(text, candidates) {
        Some((city, score)) if score > MIN_SCORE => {
            debug!(input = text, city, score, "resolved city");
            Some(city.to_string())
        }
        Some((city, score)) => {
            debug!(input = text, closest = city, score, "no city close enough");
            None
        }
        None => None,
    }
}
