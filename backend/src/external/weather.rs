//! Weather API client for fetching forecasts
//!
//! Integrates with the MET Norway locationforecast API. MET requires an
//! identifying User-Agent and rejects coordinates with more than 4 decimals.

use reqwest::Client;
use shared::{Coordinate, RawForecast};

use crate::error::{AppError, AppResult};

/// Forecast fetcher backed by MET Norway
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    contact: Option<String>,
}

impl WeatherClient {
    /// Create a new WeatherClient against `base_url`. The User-Agent is
    /// taken from `client`.
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            contact: None,
        }
    }

    /// Contact address sent in the `From` header
    pub fn with_contact(mut self, contact: String) -> Self {
        self.contact = Some(contact).filter(|c| !c.trim().is_empty());
        self
    }

    /// Fetch the hourly forecast for `coordinate`
    pub async fn get_forecast(&self, coordinate: Coordinate) -> AppResult<RawForecast> {
        let coordinate = coordinate.truncated();
        tracing::debug!("Fetching forecast for {} via {}", coordinate, self.base_url);

        let mut request = self.client.get(&self.base_url).query(&[
            ("lat", format!("{:.4}", coordinate.latitude)),
            ("lon", format!("{:.4}", coordinate.longitude)),
        ]);
        if let Some(contact) = &self.contact {
            request = request.header(reqwest::header::FROM, contact);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Weather API request failed: {}", e);
            AppError::ForecastFetchFailure(format!("request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let failure = super::describe_failure(response).await;
            tracing::warn!("Weather API error: {}", failure);
            return Err(AppError::ForecastFetchFailure(failure));
        }

        let forecast: RawForecast = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse forecast response: {}", e);
            AppError::ForecastFetchFailure(format!("invalid response: {}", e))
        })?;

        tracing::info!(
            "Received {} forecast entries for {}",
            forecast.timeseries().len(),
            coordinate
        );

        Ok(forecast)
    }
}
