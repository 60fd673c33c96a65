//! Validation utilities for the weather dashboard

use crate::types::Coordinate;

/// Longest place name accepted from the search box
pub const MAX_PLACE_QUERY_LEN: usize = 100;

/// Largest horizon the forecast table may be configured with
pub const MAX_HORIZON_HOURS: usize = 48;

/// Validate a free-text place query
pub fn validate_place_query(query: &str) -> Result<(), &'static str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err("Place name must not be empty");
    }
    if trimmed.chars().count() > MAX_PLACE_QUERY_LEN {
        return Err("Place name is too long");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("Place name contains control characters");
    }
    Ok(())
}

/// Validate the configured forecast horizon
pub fn validate_horizon(hours: usize) -> Result<(), &'static str> {
    if hours == 0 {
        return Err("Forecast horizon must be at least one hour");
    }
    if hours > MAX_HORIZON_HOURS {
        return Err("Forecast horizon must be at most 48 hours");
    }
    Ok(())
}

/// Validate latitude/longitude ranges
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    if !coordinate.latitude.is_finite() || !(-90.0..=90.0).contains(&coordinate.latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !coordinate.longitude.is_finite() || !(-180.0..=180.0).contains(&coordinate.longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_query() {
        assert!(validate_place_query("Brno").is_ok());
        assert!(validate_place_query("  São Paulo ").is_ok());
        assert!(validate_place_query("").is_err());
        assert!(validate_place_query("   ").is_err());
        assert!(validate_place_query("Brno\u{0}").is_err());
        assert!(validate_place_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_horizon() {
        assert!(validate_horizon(12).is_ok());
        assert!(validate_horizon(48).is_ok());
        assert!(validate_horizon(0).is_err());
        assert!(validate_horizon(49).is_err());
    }

    #[test]
    fn test_coordinate() {
        assert!(validate_coordinate(&Coordinate::new(50.08, 14.42)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(91.0, 0.0)).is_err());
        assert!(validate_coordinate(&Coordinate::new(0.0, -180.5)).is_err());
        assert!(validate_coordinate(&Coordinate::new(f64::NAN, 0.0)).is_err());
    }
}
