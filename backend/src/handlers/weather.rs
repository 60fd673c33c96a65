//! HTTP handlers for the dashboard page and forecast endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{export_to_csv, DashboardReport};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Serve the single-page dashboard
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Query parameters for a forecast search
#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub format: Option<String>, // "json" or "csv"
}

/// Search a place and return its forecast report (JSON) or table (CSV)
pub async fn get_forecast(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> AppResult<Response> {
    // Missing or undecodable parameters get the same JSON error body
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match query.format.as_deref() {
        Some("csv") => {
            let lookup = state.dashboard.lookup(&query.city).await?;
            let csv = export_to_csv(&lookup.forecast)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"forecast.csv\""),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => {
            let report: DashboardReport = state.dashboard.build_report(&query.city).await?;
            Ok(Json(report).into_response())
        }
        Some(other) => Err(AppError::Validation(format!(
            "Unsupported format '{}', expected json or csv",
            other
        ))),
    }
}
