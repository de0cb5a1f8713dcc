//! City → stations directory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::Station;
use crate::gios::{GiosClient, GiosError, StationDto};

/// An immutable view of the directory at one point in time.
///
/// Snapshots are never modified; a refresh builds a new one and swaps it in,
/// so readers never observe a half-built mapping.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    /// Incremented by every successful refresh. 0 means never fetched.
    generation: u64,
    fetched_at: Option<Instant>,
    by_city: HashMap<String, Vec<Station>>,
    /// City names in ascending order.
    cities: Vec<String>,
}

impl DirectorySnapshot {
    fn build(generation: u64, stations: Vec<StationDto>) -> Self {
        let mut by_city: HashMap<String, Vec<Station>> = HashMap::new();

        for dto in stations {
            let Some(city) = dto.city else {
                debug!(station_id = dto.id, name = %dto.station_name, "skipping station without city");
                continue;
            };
            by_city
                .entry(city.name)
                .or_default()
                .push(Station::new(dto.id, dto.station_name));
        }

        let mut cities: Vec<String> = by_city.keys().cloned().collect();
        cities.sort();

        Self {
            generation,
            fetched_at: Some(Instant::now()),
            by_city,
            cities,
        }
    }

    /// Stations in a city, in the order the API listed them.
    pub fn stations(&self, city: &str) -> Option<&[Station]> {
        self.by_city.get(city).map(Vec::as_slice)
    }

    /// Known city names in ascending order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of known cities.
    pub fn len(&self) -> usize {
        self.by_city.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_city.is_empty()
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.is_some_and(|at| at.elapsed() < ttl)
    }
}

/// Thread-safe station directory with lazy, time-bounded refresh.
///
/// There is no background task: the first caller after the TTL expires
/// performs the refresh inline. Concurrent stale callers wait on the same
/// refresh instead of each fetching the station list.
pub struct StationDirectory {
    client: GiosClient,
    ttl: Duration,
    current: RwLock<Arc<DirectorySnapshot>>,
    refresh_lock: Mutex<()>,
}

impl StationDirectory {
    /// Create an empty directory. Nothing is fetched until the first refresh.
    pub fn new(client: GiosClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            current: RwLock::new(Arc::new(DirectorySnapshot::default())),
            refresh_lock: Mutex::new(()),
        }
    }

    /// The current snapshot, without refreshing.
    pub async fn snapshot(&self) -> Arc<DirectorySnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Refresh the directory if it is older than the TTL and return the
    /// current snapshot.
    ///
    /// On failure the existing snapshot is kept and the error is returned.
    pub async fn refresh(&self) -> Result<Arc<DirectorySnapshot>, GiosError> {
        let snapshot = self.snapshot().await;
        if snapshot.is_fresh(self.ttl) {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock
        let snapshot = self.snapshot().await;
        if snapshot.is_fresh(self.ttl) {
            return Ok(snapshot);
        }

        let stations = self.client.fetch_all_stations().await?;
        let station_count = stations.len();
        let fresh = Arc::new(DirectorySnapshot::build(
            snapshot.generation + 1,
            stations,
        ));

        info!(
            stations = station_count,
            cities = fresh.len(),
            generation = fresh.generation,
            "refreshed station directory"
        );

        *self.current.write().await = Arc::clone(&fresh);
        Ok(fresh)
    }
}
