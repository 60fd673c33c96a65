//! Plain-text summary shown next to the charts

use std::fmt::Write;

use crate::models::{unit_symbol, CurrentConditions, ForecastUnits, ResolvedLocation};

const NOT_AVAILABLE: &str = "n/a";

/// Render the multi-line summary of current conditions.
///
/// The heading uses the geocoder's country code; the timezone service is
/// only ever a source of the offset.
pub fn render_summary(
    location: &ResolvedLocation,
    conditions: &CurrentConditions,
    units: &ForecastUnits,
) -> String {
    let symbol = |s: &Option<String>| s.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut text = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(text, "{}", location.heading());
    let _ = writeln!(
        text,
        "{} {}",
        conditions.temperature,
        unit_symbol(&units.temperature)
    );
    let _ = writeln!(text, "current conditions: {}", symbol(&conditions.symbol_next_1_hours));
    let _ = writeln!(text, "forecast 6 hours: {}", symbol(&conditions.symbol_next_6_hours));
    let _ = writeln!(text, "forecast 12 hours: {}", symbol(&conditions.symbol_next_12_hours));
    let _ = writeln!(
        text,
        "wind speed: {} {}",
        conditions.wind_speed,
        unit_symbol(&units.wind_speed)
    );
    let _ = write!(text, "wind direction: {}", conditions.wind_from_direction);
    text
}
