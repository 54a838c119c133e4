//! Output side of the widget: one optional sink per display region.
//!
//! Every region is independently nullable. A surface built with no sinks
//! at all is valid; updates to absent regions are silently skipped, never
//! errors. That contract is what lets the controller run against partial
//! front-ends without branching.

/// Icon assets the widget can show. The mapping from condition keyword is
/// total: anything outside the known set resolves to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Clouds,
    Clear,
    Rain,
    Mist,
    Snow,
    Default,
    Error,
}

impl Icon {
    /// Map a provider condition keyword (`weather[0].main`) to an icon.
    pub fn for_condition(keyword: &str) -> Self {
        match keyword {
            "Clouds" => Icon::Clouds,
            "Clear" => Icon::Clear,
            "Rain" => Icon::Rain,
            "Mist" => Icon::Mist,
            "Snow" => Icon::Snow,
            _ => Icon::Default,
        }
    }

    /// Fixed asset identifier for this icon.
    pub fn asset(self) -> &'static str {
        match self {
            Icon::Clouds => "clouds.png",
            Icon::Clear => "clear.png",
            Icon::Rain => "rain.png",
            Icon::Mist => "mist.png",
            Icon::Snow => "snow.png",
            Icon::Default => "default.png",
            Icon::Error => "error.png",
        }
    }
}

/// A text-bearing display region.
pub trait TextSink: Send + Sync {
    fn set_text(&self, value: &str);
}

/// The widget's image region.
pub trait IconSink: Send + Sync {
    fn set_icon(&self, icon: Icon);
}

/// The five text regions plus the icon, each optionally wired.
#[derive(Default)]
pub struct DisplaySurface {
    place: Option<Box<dyn TextSink>>,
    temperature: Option<Box<dyn TextSink>>,
    feels_like: Option<Box<dyn TextSink>>,
    humidity: Option<Box<dyn TextSink>>,
    wind: Option<Box<dyn TextSink>>,
    observed: Option<Box<dyn TextSink>>,
    icon: Option<Box<dyn IconSink>>,
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(mut self, sink: impl TextSink + 'static) -> Self {
        self.place = Some(Box::new(sink));
        self
    }

    pub fn temperature(mut self, sink: impl TextSink + 'static) -> Self {
        self.temperature = Some(Box::new(sink));
        self
    }

    pub fn feels_like(mut self, sink: impl TextSink + 'static) -> Self {
        self.feels_like = Some(Box::new(sink));
        self
    }

    pub fn humidity(mut self, sink: impl TextSink + 'static) -> Self {
        self.humidity = Some(Box::new(sink));
        self
    }

    pub fn wind(mut self, sink: impl TextSink + 'static) -> Self {
        self.wind = Some(Box::new(sink));
        self
    }

    pub fn observed(mut self, sink: impl TextSink + 'static) -> Self {
        self.observed = Some(Box::new(sink));
        self
    }

    pub fn icon(mut self, sink: impl IconSink + 'static) -> Self {
        self.icon = Some(Box::new(sink));
        self
    }

    pub(crate) fn set_place(&self, value: &str) {
        if let Some(sink) = &self.place {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_temperature(&self, value: &str) {
        if let Some(sink) = &self.temperature {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_feels_like(&self, value: &str) {
        if let Some(sink) = &self.feels_like {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_humidity(&self, value: &str) {
        if let Some(sink) = &self.humidity {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_wind(&self, value: &str) {
        if let Some(sink) = &self.wind {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_observed(&self, value: &str) {
        if let Some(sink) = &self.observed {
            sink.set_text(value);
        }
    }

    pub(crate) fn set_icon(&self, icon: Icon) {
        if let Some(sink) = &self.icon {
            sink.set_icon(icon);
        }
    }
}

impl std::fmt::Debug for DisplaySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplaySurface")
            .field("place", &self.place.is_some())
            .field("temperature", &self.temperature.is_some())
            .field("feels_like", &self.feels_like.is_some())
            .field("humidity", &self.humidity.is_some())
            .field("wind", &self.wind.is_some())
            .field("observed", &self.observed.is_some())
            .field("icon", &self.icon.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded(Arc<Mutex<Vec<String>>>);

    impl TextSink for Recorded {
        fn set_text(&self, value: &str) {
            self.0.lock().unwrap().push(value.to_string());
        }
    }

    #[test]
    fn known_conditions_map_to_their_icons() {
        assert_eq!(Icon::for_condition("Clouds"), Icon::Clouds);
        assert_eq!(Icon::for_condition("Clear"), Icon::Clear);
        assert_eq!(Icon::for_condition("Rain"), Icon::Rain);
        assert_eq!(Icon::for_condition("Mist"), Icon::Mist);
        assert_eq!(Icon::for_condition("Snow"), Icon::Snow);
    }

    #[test]
    fn unknown_conditions_fall_back_to_default() {
        assert_eq!(Icon::for_condition("Tornado"), Icon::Default);
        assert_eq!(Icon::for_condition("clouds"), Icon::Default);
        assert_eq!(Icon::for_condition(""), Icon::Default);
    }

    #[test]
    fn assets_are_fixed_identifiers() {
        assert_eq!(Icon::Clouds.asset(), "clouds.png");
        assert_eq!(Icon::Default.asset(), "default.png");
        assert_eq!(Icon::Error.asset(), "error.png");
    }

    #[test]
    fn updates_reach_wired_sinks() {
        let place = Recorded::default();
        let surface = DisplaySurface::new().place(place.clone());

        surface.set_place("Kyiv");
        surface.set_temperature("22°C"); // no sink, skipped

        assert_eq!(*place.0.lock().unwrap(), vec!["Kyiv".to_string()]);
    }

    #[test]
    fn empty_surface_accepts_every_update() {
        let surface = DisplaySurface::new();

        surface.set_place("anywhere");
        surface.set_temperature("1°C");
        surface.set_feels_like("0°C");
        surface.set_humidity("50%");
        surface.set_wind("3km/h");
        surface.set_observed("2024-01-23 08:53 UTC");
        surface.set_icon(Icon::Error);
    }
}
