use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WidgetError, model::{WeatherQuery, WeatherReading}};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A weather backend: one query in, one reading out.
///
/// Implementations perform a single attempt per call. No retry, no
/// timeout beyond what the platform enforces; a failed attempt is
/// terminal for its trigger.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, WidgetError>;
}
