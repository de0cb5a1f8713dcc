//! Reply formatting for air conditions.

use crate::color::Color;
use crate::domain::{Condition, Measurement};

/// Unit all GIOŚ concentrations are reported in.
const UNIT: &str = "µg/m³";

/// Separator between measurements of one station.
const SEPARATOR: &str = " :: ";

/// Color for an index level: 0 and below is best, 4 and above is worst.
pub fn level_color(index_level: i32) -> Color {
    match index_level {
        i32::MIN..=0 => Color::LightGreen,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Orange,
        _ => Color::LightRed,
    }
}

fn format_measurement(measurement: &Measurement) -> String {
    let value = level_color(measurement.index_level).paint(format!("{:.1}", measurement.value));
    format!("{}: {} {}", measurement.pollutant, value, UNIT)
}

/// One reply line for a station, or `None` if it has no measurements.
pub fn format_condition(condition: &Condition) -> Option<String> {
    if condition.is_empty() {
        return None;
    }

    let prefix = Color::Cyan.paint(format!("[{}]", condition.station.name));
    let measurements: Vec<String> = condition
        .measurements
        .iter()
        .map(format_measurement)
        .collect();

    Some(format!("{} {}", prefix, measurements.join(SEPARATOR)))
}

/// Reply lines for a city, one per station with measurements.
pub fn format_conditions(conditions: &[Condition]) -> Vec<String> {
    conditions.iter().filter_map(format_condition).collect()
}
