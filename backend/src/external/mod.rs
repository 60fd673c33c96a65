//! External API integrations

pub mod geocoding;
pub mod timezone;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use timezone::{TimezoneClient, TimezoneInfo};
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::{Client, Response};

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Longest slice of an error body kept for the log
const MAX_ERROR_BODY_LEN: usize = 200;

/// Build the HTTP client shared by the external API clients
pub fn build_http_client(config: &HttpConfig, user_agent: &str) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(user_agent)
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Status and a short prefix of the body, for logging non-success responses
async fn describe_failure(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body: String = body.chars().take(MAX_ERROR_BODY_LEN).collect();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{} - {}", status, body)
    }
}
