use async_trait::async_trait;

use crate::error::WidgetError;

/// A single acquired position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One-shot position acquisition, the widget's stand-in for the browser
/// geolocation capability. No continuous tracking.
///
/// Denial or any acquisition failure surfaces as
/// [`WidgetError::GeolocationDenied`]; a host without any source at all is
/// the unsupported case and never reaches this trait.
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Position, WidgetError>;
}
