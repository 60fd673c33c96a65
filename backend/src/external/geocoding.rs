//! Geocoding API client
//!
//! Resolves a free-text place name to coordinates using OpenWeatherMap's
//! direct geocoding endpoint. Only the first candidate is used.

use reqwest::Client;
use serde::Deserialize;
use shared::{validate_coordinate, Coordinate, ResolvedLocation};

use crate::error::{AppError, AppResult};

/// Coordinate resolver backed by the geocoding service
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
    limit: u32,
}

/// One candidate match from the geocoding response
#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl GeocodingClient {
    /// Create a new GeocodingClient against `base_url`
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            limit: 1,
        }
    }

    /// Number of candidates to request
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Resolve `place` to the first matching location
    pub async fn resolve(&self, place: &str) -> AppResult<ResolvedLocation> {
        if self.api_key.is_empty() {
            tracing::warn!("Geocoding API key not configured");
            return Err(AppError::GeocodingFailure(
                "API key not configured".to_string(),
            ));
        }

        tracing::debug!("Geocoding '{}' via {}", place, self.base_url);

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", place), ("limit", limit.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Geocoding request failed: {}", e);
                AppError::GeocodingFailure(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let failure = super::describe_failure(response).await;
            tracing::warn!("Geocoding API error: {}", failure);
            return Err(AppError::GeocodingFailure(failure));
        }

        let matches: Vec<GeoMatch> = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse geocoding response: {}", e);
            AppError::GeocodingFailure(format!("invalid response: {}", e))
        })?;

        let Some(first) = matches.into_iter().next() else {
            tracing::warn!("No geocoding match for '{}'", place);
            return Err(AppError::LocationNotFound(place.to_string()));
        };

        let coordinate = Coordinate::new(first.lat, first.lon);
        validate_coordinate(&coordinate)
            .map_err(|e| AppError::GeocodingFailure(e.to_string()))?;

        tracing::info!("Geocoded '{}' to {} ({})", place, first.name, coordinate);

        Ok(ResolvedLocation {
            query: place.to_string(),
            name: first.name,
            country_code: first.country,
            state: first.state,
            coordinate,
        })
    }
}
