//! Timezone API client
//!
//! Looks up the DST-aware UTC offset of a coordinate using GeoNames
//! `timezoneJSON`. GeoNames reports account and quota problems with a
//! 200 status and a `status` object in the body.

use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, Offset};

use crate::error::{AppError, AppResult};

/// Timezone resolver backed by GeoNames
#[derive(Clone)]
pub struct TimezoneClient {
    client: Client,
    username: String,
    base_url: String,
}

/// Timezone details for a coordinate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    pub timezone_id: Option<String>,
    /// Kept as raw JSON so a malformed value surfaces as a missing offset
    #[serde(default)]
    pub dst_offset: Option<serde_json::Value>,
    /// Local sunrise, `yyyy-MM-dd HH:mm`
    pub sunrise: Option<String>,
    /// Local sunset, `yyyy-MM-dd HH:mm`
    pub sunset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoNamesStatus {
    message: String,
    value: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GeoNamesErrorBody {
    status: GeoNamesStatus,
}

impl TimezoneInfo {
    /// Current offset from UTC, daylight saving included
    pub fn offset(&self) -> Option<Offset> {
        self.dst_offset
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .and_then(Offset::from_fractional_hours)
    }
}

impl TimezoneClient {
    /// Create a new TimezoneClient against `base_url`
    pub fn with_base_url(client: Client, username: String, base_url: String) -> Self {
        Self {
            client,
            username,
            base_url,
        }
    }

    /// Fetch timezone details for `coordinate`
    pub async fn lookup(&self, coordinate: Coordinate) -> AppResult<TimezoneInfo> {
        tracing::debug!("Looking up timezone for {} via {}", coordinate, self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lng", coordinate.longitude.to_string()),
                ("username", self.username.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Timezone request failed: {}", e);
                AppError::TimezoneLookupFailure(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let failure = super::describe_failure(response).await;
            tracing::warn!("Timezone API error: {}", failure);
            return Err(AppError::TimezoneLookupFailure(failure));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse timezone response: {}", e);
            AppError::TimezoneLookupFailure(format!("invalid response: {}", e))
        })?;

        if let Ok(error) = serde_json::from_value::<GeoNamesErrorBody>(body.clone()) {
            let failure = match error.status.value {
                Some(code) => format!("{} (code {})", error.status.message, code),
                None => error.status.message,
            };
            tracing::warn!("Timezone API error: {}", failure);
            return Err(AppError::TimezoneLookupFailure(failure));
        }

        let info: TimezoneInfo = serde_json::from_value(body).map_err(|e| {
            tracing::warn!("Failed to parse timezone response: {}", e);
            AppError::TimezoneLookupFailure(format!("invalid response: {}", e))
        })?;

        tracing::info!(
            "Timezone for {}: {} ({:?})",
            coordinate,
            info.timezone_id.as_deref().unwrap_or("unknown"),
            info.offset()
        );

        Ok(info)
    }
}
