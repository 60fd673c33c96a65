//! Error handling for the weather dashboard
//!
//! Every failure is reported to the page as JSON naming the external call
//! (if any) that caused it. Nothing here is fatal to the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ExtractError;
use thiserror::Error;

/// External collaborators a request depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalService {
    Geocoding,
    Timezone,
    Weather,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Coordinate resolver
    #[error("No place found matching '{0}'")]
    LocationNotFound(String),

    #[error("Geocoding failed: {0}")]
    GeocodingFailure(String),

    // Timezone resolver
    #[error("Timezone lookup failed: {0}")]
    TimezoneLookupFailure(String),

    // Forecast fetcher
    #[error("Forecast fetch failed: {0}")]
    ForecastFetchFailure(String),

    // Forecast extractor
    #[error("UTC offset is missing or malformed")]
    MissingOffset,

    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// The external call this error originated from, if any
    pub fn service(&self) -> Option<ExternalService> {
        match self {
            AppError::LocationNotFound(_) | AppError::GeocodingFailure(_) => {
                Some(ExternalService::Geocoding)
            }
            AppError::TimezoneLookupFailure(_) | AppError::MissingOffset => {
                Some(ExternalService::Timezone)
            }
            AppError::ForecastFetchFailure(_) | AppError::MalformedForecast(_) => {
                Some(ExternalService::Weather)
            }
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::GeocodingFailure(_)
            | AppError::TimezoneLookupFailure(_)
            | AppError::ForecastFetchFailure(_)
            | AppError::MissingOffset
            | AppError::MalformedForecast(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            AppError::GeocodingFailure(_) => "GEOCODING_FAILURE",
            AppError::TimezoneLookupFailure(_) => "TIMEZONE_LOOKUP_FAILURE",
            AppError::ForecastFetchFailure(_) => "FORECAST_FETCH_FAILURE",
            AppError::MissingOffset => "MISSING_OFFSET",
            AppError::MalformedForecast(_) => "MALFORMED_FORECAST",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::MissingOffset => AppError::MissingOffset,
            ExtractError::MalformedForecast(reason) => AppError::MalformedForecast(reason.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub service: Option<ExternalService>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Internal details stay in the log
            AppError::Internal(_) | AppError::Configuration(_) => {
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        };
        let error_detail = ErrorDetail {
            code: self.code().to_string(),
            message,
            service: self.service(),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
