//! Common types used across the dashboard

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GPS coordinates of a resolved place
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates rounded down to 4 decimals (about 11 m), the finest
    /// precision MET Norway accepts.
    pub fn truncated(&self) -> Self {
        Self {
            latitude: truncate_to_4_decimals(self.latitude),
            longitude: truncate_to_4_decimals(self.longitude),
        }
    }
}

/// Values already at 4 decimals can scale to just below the integer
/// (0.1309 * 10^4 = 1308.99..), so snap those before truncating.
fn truncate_to_4_decimals(value: f64) -> f64 {
    let scaled = value * 10_000.0;
    let nearest = scaled.round();
    let units = if (scaled - nearest).abs() < 1e-6 {
        nearest
    } else {
        scaled.trunc()
    };
    units / 10_000.0
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Largest offset from UTC in use anywhere (Line Islands, UTC+14)
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Local-time deviation from UTC at the queried place.
///
/// Held in whole minutes so that half- and quarter-hour zones survive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "f64", try_from = "f64")]
pub struct Offset {
    minutes: i32,
}

impl Offset {
    pub const UTC: Offset = Offset { minutes: 0 };

    /// Build an offset from a whole hour count
    pub fn from_hours(hours: i32) -> Option<Self> {
        Self::from_minutes(hours.checked_mul(60)?)
    }

    pub fn from_minutes(minutes: i32) -> Option<Self> {
        if minutes.abs() > MAX_OFFSET_MINUTES || minutes % 15 != 0 {
            return None;
        }
        Some(Self { minutes })
    }

    /// Parse a fractional hour count as reported by timezone services (e.g. `5.5`).
    /// Returns `None` for non-finite, out-of-range or non quarter-hour values.
    pub fn from_fractional_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        let minutes = hours * 60.0;
        let rounded = minutes.round();
        if (minutes - rounded).abs() > 1e-6 || rounded.abs() > MAX_OFFSET_MINUTES as f64 {
            return None;
        }
        Self::from_minutes(rounded as i32)
    }

    pub fn minutes(&self) -> i32 {
        self.minutes
    }

    pub fn hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// Shift a UTC wall-clock time into local time
    pub fn localize(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc + self.as_duration()
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

impl From<Offset> for f64 {
    fn from(offset: Offset) -> Self {
        offset.hours()
    }
}

impl TryFrom<f64> for Offset {
    type Error = String;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Offset::from_fractional_hours(hours).ok_or_else(|| format!("invalid UTC offset: {}", hours))
    }
}
