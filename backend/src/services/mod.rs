//! Business logic services

pub mod charts;
pub mod dashboard;
pub mod export;

pub use charts::{build_charts, DashboardCharts};
pub use dashboard::{DashboardReport, DashboardService, ForecastLookup, TimezoneSummary};
pub use export::export_to_csv;
