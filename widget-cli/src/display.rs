//! Terminal rendition of the widget's display regions: each sink prints a
//! labelled line as soon as it is set. Blank updates (the error state
//! clearing a field) print nothing.

use widget_core::{DisplaySurface, Icon, IconSink, TextSink};

struct LabelledLine {
    label: &'static str,
}

impl TextSink for LabelledLine {
    fn set_text(&self, value: &str) {
        if value.is_empty() {
            return;
        }
        println!("{:<12} {}", self.label, value);
    }
}

struct IconLine;

impl IconSink for IconLine {
    fn set_icon(&self, icon: Icon) {
        println!("{:<12} {} ({})", "conditions", glyph(icon), icon.asset());
    }
}

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Clouds => "☁",
        Icon::Clear => "☀",
        Icon::Rain => "🌧",
        Icon::Mist => "🌫",
        Icon::Snow => "❄",
        Icon::Default => "•",
        Icon::Error => "✗",
    }
}

/// The full six-region surface printed as labelled lines.
pub fn terminal_surface() -> DisplaySurface {
    DisplaySurface::new()
        .place(LabelledLine { label: "place" })
        .temperature(LabelledLine { label: "temperature" })
        .feels_like(LabelledLine { label: "feels like" })
        .humidity(LabelledLine { label: "humidity" })
        .wind(LabelledLine { label: "wind" })
        .observed(LabelledLine { label: "observed" })
        .icon(IconLine)
}
