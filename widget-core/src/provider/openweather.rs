use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::WidgetError,
    model::{WeatherQuery, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at a different host. Used by tests to target a
    /// mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    fn query_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            WeatherQuery::City { name } => vec![("q", name.clone())],
            WeatherQuery::Coordinates { latitude, longitude } => {
                vec![("lat", latitude.to_string()), ("lon", longitude.to_string())]
            }
        };

        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, WidgetError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(%url, kind = %query.kind(), "fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(WidgetError::NotFound(query.kind()));
        }

        if !status.is_success() {
            return Err(WidgetError::Transport(format!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| WidgetError::Parse(e.to_string()))?;

        // The `cod` field arrives as a string on some responses and a
        // number on others; a 404 in either shape means not found.
        if is_not_found(&value) {
            return Err(WidgetError::NotFound(query.kind()));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_value(value).map_err(|e| WidgetError::Parse(e.to_string()))?;

        let observation_time = DateTime::<Utc>::from_timestamp(parsed.dt, 0)
            .unwrap_or_else(Utc::now);

        let condition = parsed
            .weather
            .first()
            .map(|w| w.main.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(WeatherReading {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            condition,
            observation_time,
        })
    }
}

fn is_not_found(value: &Value) -> bool {
    match value.get("cod") {
        Some(Value::String(s)) => s == "404",
        Some(Value::Number(n)) => n.as_i64() == Some(404),
        _ => false,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to the nearest char boundary; byte 200 can land inside a
    // multi-byte character.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueryKind;
    use serde_json::json;

    #[test]
    fn not_found_matches_string_and_numeric_cod() {
        assert!(is_not_found(&json!({ "cod": "404", "message": "city not found" })));
        assert!(is_not_found(&json!({ "cod": 404 })));
    }

    #[test]
    fn success_and_other_codes_are_not_not_found() {
        assert!(!is_not_found(&json!({ "cod": 200, "name": "Kyiv" })));
        assert!(!is_not_found(&json!({ "cod": "401" })));
        assert!(!is_not_found(&json!({ "name": "Kyiv" })));
    }

    #[test]
    fn city_params_carry_name_key_and_units() {
        let provider = OpenWeatherProvider::new("KEY".into());
        let params = provider.query_params(&WeatherQuery::City { name: "Kyiv".into() });

        assert!(params.contains(&("q", "Kyiv".to_string())));
        assert!(params.contains(&("appid", "KEY".to_string())));
        assert!(params.contains(&("units", "metric".to_string())));
    }

    #[test]
    fn coordinate_params_are_rendered_verbatim() {
        let provider = OpenWeatherProvider::new("KEY".into());
        let query = WeatherQuery::Coordinates { latitude: 40.7, longitude: -74.0 };
        assert_eq!(query.kind(), QueryKind::Coordinates);

        let params = provider.query_params(&query);
        assert!(params.contains(&("lat", "40.7".to_string())));
        assert!(params.contains(&("lon", "-74".to_string())));
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert!(short.ends_with("..."));
        assert!(short.len() < long.len());

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_never_splits_a_character() {
        // 100 × '€' is 300 bytes; byte 200 falls mid-character.
        let long = "€".repeat(100);
        let short = truncate_body(&long);

        assert!(short.ends_with("..."));
        assert!(short.trim_end_matches("...").chars().all(|c| c == '€'));
        assert!(short.len() < long.len());
    }
}
