//! Weather Dashboard - Server binary

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_dashboard::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let json_logs = std::env::var("WD_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_dashboard=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    tracing::info!("Starting Weather Dashboard");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Forecast horizon: {} hours", config.forecast.horizon_hours);
    if config.geocoding.api_key.is_empty() {
        tracing::warn!("WD_GEOCODING__API_KEY is not set; searches will fail");
    }
    if config.timezone.username.is_empty() {
        tracing::warn!("WD_TIMEZONE__USERNAME is not set; timezone lookups will likely fail");
    }

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server.host '{}'", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
