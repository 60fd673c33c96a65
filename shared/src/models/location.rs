//! Location models

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// A place resolved from the user's free-text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// The text the user searched for
    pub query: String,
    /// Name of the matched place as reported by the geocoder
    pub name: String,
    /// ISO 3166 country code of the match
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub coordinate: Coordinate,
}

impl ResolvedLocation {
    /// Heading line shown above the summary, e.g. `Prague, CZ`
    pub fn heading(&self) -> String {
        match self.country_code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{}, {}", self.query, code),
            None => self.query.clone(),
        }
    }
}
