use thiserror::Error;

use crate::model::QueryKind;

/// Everything that can go wrong during one trigger of the widget.
///
/// Every variant is terminal for its trigger and maps 1:1 to a fixed
/// user-facing message via [`WidgetError::user_message`]; nothing here
/// propagates past the controller.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("city name is empty")]
    EmptyInput,

    #[error("{0} not found")]
    NotFound(QueryKind),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid provider response: {0}")]
    Parse(String),

    #[error("geolocation request denied or failed")]
    GeolocationDenied,

    #[error("no geolocation capability available")]
    GeolocationUnsupported,
}

impl WidgetError {
    /// The message rendered into the widget's place label for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            WidgetError::EmptyInput => "Please enter a city name.",
            WidgetError::NotFound(QueryKind::City) => "City not found",
            WidgetError::NotFound(QueryKind::Coordinates) => "Location not found",
            WidgetError::Transport(_) | WidgetError::Parse(_) => {
                "Failed to fetch data. Please try again."
            }
            WidgetError::GeolocationDenied => "Unable to retrieve your location.",
            WidgetError::GeolocationUnsupported => {
                "Geolocation is not supported by this browser."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_depends_on_query_kind() {
        assert_eq!(
            WidgetError::NotFound(QueryKind::City).user_message(),
            "City not found"
        );
        assert_eq!(
            WidgetError::NotFound(QueryKind::Coordinates).user_message(),
            "Location not found"
        );
    }

    #[test]
    fn transport_and_parse_share_the_retry_message() {
        let transport = WidgetError::Transport("connection refused".into());
        let parse = WidgetError::Parse("expected value at line 1".into());

        assert_eq!(transport.user_message(), "Failed to fetch data. Please try again.");
        assert_eq!(parse.user_message(), transport.user_message());
    }

    #[test]
    fn geolocation_messages_are_distinct() {
        assert_ne!(
            WidgetError::GeolocationDenied.user_message(),
            WidgetError::GeolocationUnsupported.user_message()
        );
    }
}
