//! Caching layer for assembled air conditions.
//!
//! A city's report costs one request per sensor per station, so the
//! assembled report is cached per city. Readings are published hourly;
//! half an hour keeps replies reasonably fresh.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::conditions::{ConditionError, ConditionService};
use crate::domain::Condition;
use crate::gios::GiosClient;
use crate::stations::StationDirectory;

/// Cached conditions of one city.
type ConditionEntry = Arc<Vec<Condition>>;

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long the station directory stays valid.
    pub directory_ttl: Duration,

    /// TTL for cached city conditions.
    pub conditions_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory_ttl: Duration::from_secs(12 * 60 * 60),
            conditions_ttl: Duration::from_secs(30 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache for assembled conditions, keyed by city name.
pub struct ConditionCache {
    cities: MokaCache<String, ConditionEntry>,
}

impl ConditionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cities = MokaCache::builder()
            .time_to_live(config.conditions_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { cities }
    }

    /// Number of cached cities.
    #[cfg(test)]
    pub fn entry_count(&self) -> u64 {
        self.cities.entry_count()
    }

    /// Invalidate all cached entries.
    #[cfg(test)]
    pub fn invalidate_all(&self) {
        self.cities.invalidate_all();
    }
}

/// Condition service with caching.
///
/// Concurrent requests for the same uncached city share one assembly.
pub struct CachedConditions {
    service: ConditionService,
    cache: ConditionCache,
}

impl CachedConditions {
    /// Create a new cached service.
    pub fn new(
        client: GiosClient,
        directory: Arc<StationDirectory>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            service: ConditionService::new(client, directory),
            cache: ConditionCache::new(cache_config),
        }
    }

    /// Get the conditions at every station of a city, using the cache if
    /// available.
    ///
    /// Failed assemblies are not cached.
    pub async fn get_conditions(&self, city: &str) -> Result<ConditionEntry, ConditionError> {
        self.cache
            .cities
            .try_get_with(city.to_string(), async {
                self.service.assemble(city).await.map(Arc::new)
            })
            .await
            .map_err(|e| ConditionError::clone(&e))
    }

    /// Get cache statistics.
    #[cfg(test)]
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    #[cfg(test)]
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
