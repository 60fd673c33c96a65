//! Weather data models
//!
//! The `Raw*` types mirror the MET Norway `locationforecast/2.0/compact`
//! payload. Every measured value is optional on the wire; the extractor
//! decides which ones are required.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Offset;

/// Full forecast document as returned by the weather service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawForecast {
    pub properties: RawProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RawMeta>,
    #[serde(default)]
    pub timeseries: Vec<RawTimeStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Field name to unit, e.g. `air_pressure_at_sea_level` -> `hPa`
    #[serde(default)]
    pub units: HashMap<String, String>,
}

/// One hourly entry of the forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimeStep {
    pub time: DateTime<Utc>,
    pub data: RawStepData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStepData {
    #[serde(default)]
    pub instant: RawInstant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_1_hours: Option<RawWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_6_hours: Option<RawWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_12_hours: Option<RawWindow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInstant {
    #[serde(default)]
    pub details: InstantDetails,
}

/// Instantaneous values at the entry's timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstantDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_pressure_at_sea_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_area_fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_from_direction: Option<f64>,
}

/// Summary over the window following the entry's timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<WindowSummary>,
    #[serde(default)]
    pub details: WindowDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSummary {
    pub symbol_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_amount: Option<f64>,
}

impl RawWindow {
    pub fn symbol_code(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.symbol_code.as_str())
    }
}

impl RawForecast {
    pub fn timeseries(&self) -> &[RawTimeStep] {
        &self.properties.timeseries
    }

    pub fn units(&self) -> Option<&HashMap<String, String>> {
        self.properties.meta.as_ref().map(|m| &m.units)
    }
}

/// Units attached to the normalized table, passed through from the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastUnits {
    pub temperature: String,
    pub pressure: String,
    pub precipitation: String,
    pub cloud_area_fraction: String,
    pub wind_speed: String,
    pub wind_from_direction: String,
}

impl Default for ForecastUnits {
    fn default() -> Self {
        Self {
            temperature: "celsius".to_string(),
            pressure: "hPa".to_string(),
            precipitation: "mm".to_string(),
            cloud_area_fraction: "%".to_string(),
            wind_speed: "m/s".to_string(),
            wind_from_direction: "degrees".to_string(),
        }
    }
}

impl ForecastUnits {
    /// Take units from the source's `meta.units`, keeping defaults for any it omits
    pub fn from_source(units: Option<&HashMap<String, String>>) -> Self {
        let mut result = Self::default();
        let Some(units) = units else {
            return result;
        };

        let fields: [(&str, &mut String); 6] = [
            ("air_temperature", &mut result.temperature),
            ("air_pressure_at_sea_level", &mut result.pressure),
            ("precipitation_amount", &mut result.precipitation),
            ("cloud_area_fraction", &mut result.cloud_area_fraction),
            ("wind_speed", &mut result.wind_speed),
            ("wind_from_direction", &mut result.wind_from_direction),
        ];
        for (key, slot) in fields {
            if let Some(unit) = units.get(key).filter(|u| !u.is_empty()) {
                *slot = unit.clone();
            }
        }

        result
    }
}

/// Short label for a unit name, for axis titles and summary lines
pub fn unit_symbol(unit: &str) -> &str {
    match unit {
        "celsius" => "°C",
        "fahrenheit" => "°F",
        "degrees" => "°",
        other => other,
    }
}

/// One row of the normalized forecast, in local time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
    pub precipitation: f64,
    pub cloud_area_fraction: f64,
}

/// Fixed-length, time-localized forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub offset: Offset,
    pub units: ForecastUnits,
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, f: impl Fn(&ForecastRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }
}

/// Conditions at the first entry of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_from_direction: f64,
    pub symbol_next_1_hours: Option<String>,
    pub symbol_next_6_hours: Option<String>,
    pub symbol_next_12_hours: Option<String>,
}
