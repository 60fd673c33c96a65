//! Dashboard service: one search in, one structured report out
//!
//! Fetching and normalizing (`lookup`) is kept apart from presentation
//! (`DashboardReport::from_lookup`). The three external calls run one after
//! another and nothing is kept between requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    current_conditions, extract_forecast, render_summary, validate_place_query, CurrentConditions,
    ForecastTable, Offset, ResolvedLocation,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{build_http_client, GeocodingClient, TimezoneClient, TimezoneInfo, WeatherClient};
use crate::services::charts::{build_charts, DashboardCharts};

/// Orchestrates the geocoding, timezone and weather lookups
#[derive(Clone)]
pub struct DashboardService {
    geocoding: GeocodingClient,
    timezone: TimezoneClient,
    weather: WeatherClient,
    horizon: usize,
}

/// Local timezone details shown with the report
#[derive(Debug, Clone, Serialize)]
pub struct TimezoneSummary {
    pub timezone_id: Option<String>,
    pub offset: Offset,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Fetched and normalized data for one search
#[derive(Debug, Clone)]
pub struct ForecastLookup {
    pub location: ResolvedLocation,
    pub timezone: TimezoneSummary,
    pub forecast: ForecastTable,
    pub current: CurrentConditions,
    pub forecast_updated_at: Option<DateTime<Utc>>,
}

/// Everything the page needs to render one search
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub location: ResolvedLocation,
    pub timezone: TimezoneSummary,
    pub forecast: ForecastTable,
    pub current: CurrentConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_updated_at: Option<DateTime<Utc>>,
    pub summary: String,
    pub charts: DashboardCharts,
}

impl DashboardReport {
    pub fn from_lookup(lookup: ForecastLookup) -> AppResult<Self> {
        let summary = render_summary(&lookup.location, &lookup.current, &lookup.forecast.units);
        let charts = build_charts(&lookup.forecast)?;

        Ok(Self {
            location: lookup.location,
            timezone: lookup.timezone,
            forecast: lookup.forecast,
            current: lookup.current,
            forecast_updated_at: lookup.forecast_updated_at,
            summary,
            charts,
        })
    }
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(
        geocoding: GeocodingClient,
        timezone: TimezoneClient,
        weather: WeatherClient,
        horizon: usize,
    ) -> Self {
        Self {
            geocoding,
            timezone,
            weather,
            horizon,
        }
    }

    /// Build the service and its API clients from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = build_http_client(&config.http, &config.weather.user_agent)?;

        let geocoding = GeocodingClient::with_base_url(
            client.clone(),
            config.geocoding.api_key.clone(),
            config.geocoding.api_endpoint.clone(),
        )
        .with_limit(config.geocoding.result_limit);
        let timezone = TimezoneClient::with_base_url(
            client.clone(),
            config.timezone.username.clone(),
            config.timezone.api_endpoint.clone(),
        );
        let weather = WeatherClient::with_base_url(client, config.weather.api_endpoint.clone())
            .with_contact(config.weather.contact.clone());

        Ok(Self::new(geocoding, timezone, weather, config.forecast.horizon_hours))
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Resolve `place`, fetch its forecast and normalize it
    pub async fn lookup(&self, place: &str) -> AppResult<ForecastLookup> {
        validate_place_query(place).map_err(|e| AppError::Validation(e.to_string()))?;
        let place = place.trim();

        let location = self.geocoding.resolve(place).await?;
        let timezone = self.timezone.lookup(location.coordinate).await?;
        let raw = self.weather.get_forecast(location.coordinate).await?;

        let forecast = extract_forecast(timezone.offset(), &raw, self.horizon)?;
        let current = current_conditions(forecast.offset, &raw)?;

        tracing::info!(
            "Built {}-hour forecast for {} ({})",
            forecast.len(),
            location.name,
            forecast.offset
        );

        Ok(ForecastLookup {
            timezone: summarize_timezone(&timezone, forecast.offset),
            forecast_updated_at: raw.properties.meta.as_ref().and_then(|m| m.updated_at),
            location,
            forecast,
            current,
        })
    }

    /// Lookup plus summary text and charts
    pub async fn build_report(&self, place: &str) -> AppResult<DashboardReport> {
        let lookup = self.lookup(place).await?;
        DashboardReport::from_lookup(lookup)
    }
}

fn summarize_timezone(info: &TimezoneInfo, offset: Offset) -> TimezoneSummary {
    TimezoneSummary {
        timezone_id: info.timezone_id.clone(),
        offset,
        sunrise: info.sunrise.clone(),
        sunset: info.sunset.clone(),
    }
}
