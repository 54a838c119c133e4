//! The widget controller: turns user triggers into one provider request
//! each and projects the outcome onto the display surface.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, error, warn};

use crate::{
    display::{DisplaySurface, Icon},
    error::WidgetError,
    geolocation::GeolocationSource,
    model::{WeatherQuery, WeatherReading},
    provider::WeatherProvider,
};

/// Drives the widget. Each trigger issues at most one request; whichever
/// request was issued last owns the display. In-flight requests are never
/// cancelled, but a resolution that is no longer the latest issued is
/// discarded instead of rendered, so overlapping triggers cannot leave a
/// stale reading on screen.
pub struct WeatherWidgetController {
    provider: Arc<dyn WeatherProvider>,
    geolocation: Option<Arc<dyn GeolocationSource>>,
    surface: DisplaySurface,
    seq: AtomicU64,
    render_gate: Mutex<()>,
}

impl WeatherWidgetController {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        geolocation: Option<Arc<dyn GeolocationSource>>,
        surface: DisplaySurface,
    ) -> Self {
        if geolocation.is_none() {
            warn!("no geolocation source wired; the location trigger will report unsupported");
        }

        Self {
            provider,
            geolocation,
            surface,
            seq: AtomicU64::new(0),
            render_gate: Mutex::new(()),
        }
    }

    /// Look up weather for a typed city name.
    ///
    /// Blank input (after trimming) renders the empty-input message
    /// without issuing a request.
    pub async fn search_by_city(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.render_error(WidgetError::EmptyInput.user_message());
            return;
        }

        let seq = self.issue();
        let query = WeatherQuery::City { name: city.to_string() };
        let result = self.provider.fetch(&query).await;
        self.resolve(seq, result);
    }

    /// Look up weather for explicit coordinates.
    pub async fn search_by_coordinates(&self, latitude: f64, longitude: f64) {
        let seq = self.issue();
        let query = WeatherQuery::Coordinates { latitude, longitude };
        let result = self.provider.fetch(&query).await;
        self.resolve(seq, result);
    }

    /// Acquire the current position once and look up weather for it.
    pub async fn use_current_location(&self) {
        let Some(source) = self.geolocation.clone() else {
            self.render_error(WidgetError::GeolocationUnsupported.user_message());
            return;
        };

        match source.current_position().await {
            Ok(position) => {
                self.search_by_coordinates(position.latitude, position.longitude).await;
            }
            Err(err) => {
                debug!(%err, "geolocation acquisition failed");
                self.render_error(WidgetError::GeolocationDenied.user_message());
            }
        }
    }

    /// Project a reading onto the display surface.
    pub fn render(&self, reading: &WeatherReading) {
        self.surface.set_place(&reading.location_name);
        self.surface
            .set_temperature(&format!("{}°C", reading.temperature_c.round() as i64));
        self.surface
            .set_feels_like(&format!("{}°C", reading.feels_like_c.round() as i64));
        self.surface.set_humidity(&format!("{}%", reading.humidity_pct));
        self.surface.set_wind(&format!("{}km/h", reading.wind_speed.round() as i64));
        self.surface.set_observed(
            &reading.observation_time.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        self.surface.set_icon(Icon::for_condition(&reading.condition));
    }

    /// Show an error message: message into the place label, the other
    /// text fields blanked, error icon.
    pub fn render_error(&self, message: &str) {
        self.surface.set_place(message);
        self.surface.set_temperature("");
        self.surface.set_feels_like("");
        self.surface.set_humidity("");
        self.surface.set_wind("");
        self.surface.set_observed("");
        self.surface.set_icon(Icon::Error);
    }

    /// Take the next request sequence number. The latest issued number
    /// owns the display.
    fn issue(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn resolve(&self, seq: u64, result: Result<WeatherReading, WidgetError>) {
        // The gate spans the stale check and the render: a newer
        // resolution cannot land between them and then be overwritten.
        let _gate = self.render_gate.lock().unwrap_or_else(PoisonError::into_inner);

        if self.seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding stale response");
            return;
        }

        match result {
            Ok(reading) => self.render(&reading),
            Err(err) => {
                if matches!(err, WidgetError::Transport(_) | WidgetError::Parse(_)) {
                    error!(%err, "weather fetch failed");
                }
                self.render_error(err.user_message());
            }
        }
    }
}

impl std::fmt::Debug for WeatherWidgetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherWidgetController")
            .field("provider", &self.provider)
            .field("geolocation", &self.geolocation.is_some())
            .field("surface", &self.surface)
            .field("seq", &self.seq.load(Ordering::SeqCst))
            .finish()
    }
}
