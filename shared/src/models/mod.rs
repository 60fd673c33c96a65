//! Domain models for the weather dashboard

mod location;
mod weather;

pub use location::*;
pub use weather::*;
