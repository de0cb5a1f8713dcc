//! Monitoring station directory.
//!
//! Provides the city name → stations mapping, fetched from the GIOŚ
//! station list on first use and refreshed lazily once it goes stale.

mod directory;

pub use directory::{DirectorySnapshot, StationDirectory};
