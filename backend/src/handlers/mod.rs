//! HTTP handlers

pub mod health;
pub mod weather;

pub use health::health_check;
pub use weather::{get_forecast, index};
