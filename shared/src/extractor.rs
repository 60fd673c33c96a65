//! Forecast extraction
//!
//! Turns the raw hourly series into the fixed-length, time-localized table
//! the dashboard renders. Pure functions only; all I/O happens upstream.

use thiserror::Error;

use crate::models::{CurrentConditions, ForecastRow, ForecastTable, ForecastUnits, RawForecast, RawTimeStep};
use crate::types::Offset;

/// Default number of hourly rows in the table
pub const FORECAST_INTERVAL_IN_HOURS: usize = 12;

/// Errors produced while normalizing a forecast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("UTC offset is missing or malformed")]
    MissingOffset,

    #[error("Malformed forecast: {0}")]
    MalformedForecast(#[from] MalformedForecast),
}

/// Why a raw forecast series was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedForecast {
    #[error("expected at least {expected} entries, found {found}")]
    TooShort { expected: usize, found: usize },

    #[error("entry {index} has no {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} is not later than the entry before it")]
    OutOfOrder { index: usize },
}

fn missing(index: usize, field: &'static str) -> ExtractError {
    MalformedForecast::MissingField { index, field }.into()
}

fn require(value: Option<f64>, index: usize, field: &'static str) -> Result<f64, ExtractError> {
    value.ok_or_else(|| missing(index, field))
}

/// Extract `horizon` localized rows from the head of the series.
///
/// Row `i` is entry `i` shifted by `offset`, with temperature, pressure and
/// cloud fraction from the instant details and precipitation from the
/// next-hour window. Values keep the units of the source.
pub fn extract_forecast(
    offset: Option<Offset>,
    forecast: &RawForecast,
    horizon: usize,
) -> Result<ForecastTable, ExtractError> {
    let offset = offset.ok_or(ExtractError::MissingOffset)?;

    let series = forecast.timeseries();
    if series.len() < horizon {
        return Err(MalformedForecast::TooShort {
            expected: horizon,
            found: series.len(),
        }
        .into());
    }

    let mut rows = Vec::with_capacity(horizon);
    let mut previous: Option<&RawTimeStep> = None;

    for (index, step) in series.iter().take(horizon).enumerate() {
        if let Some(prev) = previous {
            if step.time <= prev.time {
                return Err(MalformedForecast::OutOfOrder { index }.into());
            }
        }
        rows.push(extract_row(offset, index, step)?);
        previous = Some(step);
    }

    Ok(ForecastTable {
        offset,
        units: ForecastUnits::from_source(forecast.units()),
        rows,
    })
}

fn extract_row(offset: Offset, index: usize, step: &RawTimeStep) -> Result<ForecastRow, ExtractError> {
    let details = &step.data.instant.details;
    let precipitation = step
        .data
        .next_1_hours
        .as_ref()
        .and_then(|w| w.details.precipitation_amount);

    Ok(ForecastRow {
        time: offset.localize(step.time.naive_utc()),
        temperature: require(details.air_temperature, index, "air_temperature")?,
        pressure: require(details.air_pressure_at_sea_level, index, "air_pressure_at_sea_level")?,
        precipitation: require(precipitation, index, "next_1_hours.precipitation_amount")?,
        cloud_area_fraction: require(details.cloud_area_fraction, index, "cloud_area_fraction")?,
    })
}

/// Read the conditions shown in the text summary from the first entry
pub fn current_conditions(offset: Offset, forecast: &RawForecast) -> Result<CurrentConditions, ExtractError> {
    let step = forecast.timeseries().first().ok_or(MalformedForecast::TooShort {
        expected: 1,
        found: 0,
    })?;
    let details = &step.data.instant.details;
    let symbol = |w: &Option<crate::models::RawWindow>| {
        w.as_ref().and_then(|w| w.symbol_code()).map(str::to_string)
    };

    Ok(CurrentConditions {
        time: offset.localize(step.time.naive_utc()),
        temperature: require(details.air_temperature, 0, "air_temperature")?,
        wind_speed: require(details.wind_speed, 0, "wind_speed")?,
        wind_from_direction: require(details.wind_from_direction, 0, "wind_from_direction")?,
        symbol_next_1_hours: symbol(&step.data.next_1_hours),
        symbol_next_6_hours: symbol(&step.data.next_6_hours),
        symbol_next_12_hours: symbol(&step.data.next_12_hours),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstantDetails, RawInstant, RawStepData, RawWindow, WindowDetails, WindowSummary};
    use chrono::{Duration, TimeZone, Utc};

    fn step(hour: i64, temperature: f64) -> RawTimeStep {
        RawTimeStep {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour),
            data: RawStepData {
                instant: RawInstant {
                    details: InstantDetails {
                        air_temperature: Some(temperature),
                        air_pressure_at_sea_level: Some(1010.0 + hour as f64),
                        cloud_area_fraction: Some(50.0),
                        wind_speed: Some(2.5),
                        wind_from_direction: Some(180.0),
                        ..Default::default()
                    },
                },
                next_1_hours: Some(RawWindow {
                    summary: Some(WindowSummary {
                        symbol_code: "cloudy".to_string(),
                    }),
                    details: WindowDetails {
                        precipitation_amount: Some(0.1 * hour as f64),
                    },
                }),
                next_6_hours: None,
                next_12_hours: None,
            },
        }
    }

    fn series(len: i64) -> RawForecast {
        let mut forecast = RawForecast::default();
        forecast.properties.timeseries = (0..len).map(|h| step(h, 5.0)).collect();
        forecast
    }

    #[test]
    fn test_extract_exact_horizon() {
        let table = extract_forecast(Offset::from_hours(2), &series(12), 12).unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table.rows[0].time.to_string(), "2024-01-01 02:00:00");
        assert_eq!(table.rows[11].pressure, 1021.0);
    }

    #[test]
    fn test_extract_takes_head_of_longer_series() {
        let table = extract_forecast(Some(Offset::UTC), &series(48), 12).unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table.rows[11].time.to_string(), "2024-01-01 11:00:00");
    }

    #[test]
    fn test_extract_missing_offset() {
        let err = extract_forecast(None, &series(12), 12).unwrap_err();
        assert_eq!(err, ExtractError::MissingOffset);
    }

    #[test]
    fn test_extract_short_series() {
        let err = extract_forecast(Some(Offset::UTC), &series(5), 12).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MalformedForecast(MalformedForecast::TooShort { expected: 12, found: 5 })
        );
    }

    #[test]
    fn test_extract_missing_precipitation() {
        let mut forecast = series(12);
        forecast.properties.timeseries[3].data.next_1_hours = None;

        let err = extract_forecast(Some(Offset::UTC), &forecast, 12).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MalformedForecast(MalformedForecast::MissingField {
                index: 3,
                field: "next_1_hours.precipitation_amount",
            })
        );
    }

    #[test]
    fn test_extract_missing_field_beyond_horizon_is_ignored() {
        let mut forecast = series(14);
        forecast.properties.timeseries[13].data.instant.details.air_temperature = None;

        assert!(extract_forecast(Some(Offset::UTC), &forecast, 12).is_ok());
    }

    #[test]
    fn test_extract_out_of_order() {
        let mut forecast = series(12);
        forecast.properties.timeseries.swap(4, 5);

        let err = extract_forecast(Some(Offset::UTC), &forecast, 12).unwrap_err();
        assert_eq!(err, ExtractError::MalformedForecast(MalformedForecast::OutOfOrder { index: 5 }));
    }

    #[test]
    fn test_current_conditions() {
        let conditions = current_conditions(Offset::from_hours(1).unwrap(), &series(3)).unwrap();
        assert_eq!(conditions.temperature, 5.0);
        assert_eq!(conditions.wind_speed, 2.5);
        assert_eq!(conditions.symbol_next_1_hours.as_deref(), Some("cloudy"));
        assert_eq!(conditions.symbol_next_6_hours, None);
        assert_eq!(conditions.time.to_string(), "2024-01-01 01:00:00");
    }

    #[test]
    fn test_current_conditions_empty_series() {
        let err = current_conditions(Offset::UTC, &RawForecast::default()).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedForecast(MalformedForecast::TooShort { .. })));
    }
}
