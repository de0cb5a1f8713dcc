//! Domain types for air quality reports.
//!
//! These types are independent of the GIOŚ wire format and are what the
//! caches and the formatter work with.

mod condition;
mod station;

pub use condition::{Condition, Measurement};
pub use station::{SensorId, Station, StationId};
