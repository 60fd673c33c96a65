//! Shared types and forecast logic for the weather dashboard
//!
//! This crate holds everything that does not touch the network: domain
//! types, the MET Norway wire model, forecast extraction and the text summary.

pub mod extractor;
pub mod models;
pub mod summary;
pub mod types;
pub mod validation;

pub use extractor::*;
pub use models::*;
pub use summary::*;
pub use types::*;
pub use validation::*;
