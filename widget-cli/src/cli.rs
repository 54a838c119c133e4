use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use widget_core::{
    Config, GeolocationSource, OpenWeatherProvider, Position, WeatherWidgetController, WidgetError,
};

use crate::display::terminal_surface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and, optionally, a home position.
    Configure {
        /// Home latitude, used by `locate`.
        #[arg(long, requires = "longitude")]
        latitude: Option<f64>,

        /// Home longitude, used by `locate`.
        #[arg(long, requires = "latitude")]
        longitude: Option<f64>,
    },

    /// Show weather for a city name.
    City {
        /// City name, e.g. "Kyiv".
        name: String,
    },

    /// Show weather for explicit coordinates.
    Coords {
        latitude: f64,
        longitude: f64,
    },

    /// Show weather for the configured home position.
    Locate,
}

/// Geolocation backed by the stored home position. Standing in for a
/// platform location service, it always succeeds once configured.
#[derive(Debug)]
struct HomePositionSource {
    position: Position,
}

#[async_trait]
impl GeolocationSource for HomePositionSource {
    async fn current_position(&self) -> Result<Position, WidgetError> {
        Ok(self.position)
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { latitude, longitude } => configure(latitude, longitude),
            command => {
                let controller = build_controller()?;
                match command {
                    Command::City { name } => controller.search_by_city(&name).await,
                    Command::Coords { latitude, longitude } => {
                        controller.search_by_coordinates(latitude, longitude).await;
                    }
                    Command::Locate => controller.use_current_location().await,
                    Command::Configure { .. } => unreachable!("handled above"),
                }
                Ok(())
            }
        }
    }
}

fn build_controller() -> anyhow::Result<WeatherWidgetController> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;

    let provider = Arc::new(OpenWeatherProvider::new(api_key));
    let geolocation = config.home.map(|home| {
        Arc::new(HomePositionSource {
            position: Position { latitude: home.latitude, longitude: home.longitude },
        }) as Arc<dyn GeolocationSource>
    });

    Ok(WeatherWidgetController::new(provider, geolocation, terminal_surface()))
}

fn configure(latitude: Option<f64>, longitude: Option<f64>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);

    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        config.set_home(latitude, longitude);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
