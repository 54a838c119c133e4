//! Core library for the `weather-widget` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and the abstraction over it
//! - Display sinks (the widget's output regions)
//! - The widget controller that ties triggers to renders
//!
//! It is used by `widget-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;

pub use config::{Config, HomePosition};
pub use controller::WeatherWidgetController;
pub use display::{DisplaySurface, Icon, IconSink, TextSink};
pub use error::WidgetError;
pub use geolocation::{GeolocationSource, Position};
pub use model::{QueryKind, WeatherQuery, WeatherReading};
pub use provider::{OpenWeatherProvider, WeatherProvider};
