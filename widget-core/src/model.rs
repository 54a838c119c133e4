use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which style of lookup a request was issued for.
///
/// The widget shows a different not-found message for city lookups
/// ("City not found") than for coordinate lookups ("Location not found"),
/// so the kind travels with the query and with any resulting error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    City,
    Coordinates,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::City => f.write_str("city"),
            QueryKind::Coordinates => f.write_str("location"),
        }
    }
}

/// A single user-initiated lookup. Built per trigger, dropped once the
/// request resolves.
#[derive(Debug, Clone)]
pub enum WeatherQuery {
    City { name: String },
    Coordinates { latitude: f64, longitude: f64 },
}

impl WeatherQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            WeatherQuery::City { .. } => QueryKind::City,
            WeatherQuery::Coordinates { .. } => QueryKind::Coordinates,
        }
    }
}

/// The slice of a provider response the widget actually consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// Condition keyword as reported by the provider, e.g. "Clouds".
    pub condition: String,
    pub observation_time: DateTime<Utc>,
}
