//! Weather Dashboard - Backend
//!
//! Serves a single-page dashboard that resolves a city name, fetches its
//! short-range forecast and renders it as text and two charts.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::DashboardService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let dashboard = DashboardService::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            dashboard,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Plain liveness probe
async fn health_check() -> &'static str {
    "OK"
}
