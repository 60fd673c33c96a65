//! Configuration management for the weather dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Forecast table configuration
    pub forecast: ForecastConfig,

    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,

    /// Timezone API configuration
    pub timezone: TimezoneConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Outbound HTTP settings
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Number of hourly rows in the forecast table
    pub horizon_hours: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Direct geocoding endpoint
    pub api_endpoint: String,

    /// Geocoding API key
    pub api_key: String,

    /// Number of candidate matches requested; only the first is used
    pub result_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimezoneConfig {
    /// Timezone lookup endpoint
    pub api_endpoint: String,

    /// Account name for the timezone service
    pub username: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast endpoint
    pub api_endpoint: String,

    /// Identifying User-Agent, required by MET Norway
    pub user_agent: String,

    /// Contact address sent in the From header
    pub contact: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for each outbound request, in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(config::Config::builder(), &environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WD_ prefix)
            .add_source(
                Environment::with_prefix("WD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("server.port", 5006)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("forecast.horizon_hours", shared::FORECAST_INTERVAL_IN_HOURS as i64)?
            .set_default("geocoding.api_endpoint", "http://api.openweathermap.org/geo/1.0/direct")?
            .set_default("geocoding.api_key", "")?
            .set_default("geocoding.result_limit", 1)?
            .set_default("timezone.api_endpoint", "http://api.geonames.org/timezoneJSON")?
            .set_default("timezone.username", "")?
            .set_default(
                "weather.api_endpoint",
                "https://api.met.no/weatherapi/locationforecast/2.0/compact",
            )?
            .set_default(
                "weather.user_agent",
                concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("weather.contact", "")?
            .set_default("http.timeout_secs", 10)
    }

    /// Reject values the dashboard cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        shared::validate_horizon(self.forecast.horizon_hours)
            .map_err(|e| ConfigError::Message(format!("forecast.horizon_hours: {}", e)))?;
        if self.geocoding.result_limit == 0 {
            return Err(ConfigError::Message(
                "geocoding.result_limit must be at least 1".to_string(),
            ));
        }
        if self.weather.user_agent.trim().is_empty() {
            return Err(ConfigError::Message(
                "weather.user_agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration built from defaults alone, pointing every API at `base_url`
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            forecast: ForecastConfig {
                horizon_hours: shared::FORECAST_INTERVAL_IN_HOURS,
            },
            geocoding: GeocodingConfig {
                api_endpoint: format!("{}/geo/1.0/direct", base_url),
                api_key: "test-key".to_string(),
                result_limit: 1,
            },
            timezone: TimezoneConfig {
                api_endpoint: format!("{}/timezoneJSON", base_url),
                username: "test-user".to_string(),
            },
            weather: WeatherConfig {
                api_endpoint: format!("{}/weatherapi/locationforecast/2.0/compact", base_url),
                user_agent: "weather-dashboard-tests/0.1".to_string(),
                contact: "tests@example.com".to_string(),
            },
            http: HttpConfig { timeout_secs: 5 },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5006,
            host: "0.0.0.0".to_string(),
        }
    }
}
