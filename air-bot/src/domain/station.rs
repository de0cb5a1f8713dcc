//! Monitoring station types.

use std::fmt;

/// GIOŚ station identifier.
pub type StationId = u32;

/// GIOŚ sensor identifier.
pub type SensorId = u32;

/// A monitoring station.
///
/// Immutable once fetched; stations are grouped by city in the
/// [`StationDirectory`](crate::stations::StationDirectory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
