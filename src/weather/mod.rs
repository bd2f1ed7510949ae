//! Weather cache container and the provider seam it refreshes through.
//!
//! The provider is injected once at construction (no hidden singleton);
//! a refresh failure records the error and leaves previously cached data
//! intact, so dependents keep rendering the last good observation.

/// Generation-potential scoring from an observation.
pub mod potential;
/// Seeded offline provider.
pub mod simulated;
pub mod types;

use thiserror::Error;
use tracing::warn;

pub use potential::generation_potential;
pub use simulated::SimulatedSky;
pub use types::{DailySummary, ForecastEntry, WeatherData, WeatherForecast};

/// Failure fetching from a weather provider. Never fatal; the station
/// degrades to its cached data.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather provider error: {0}")]
    Provider(String),
}

/// Source of weather observations, injected into the station.
pub trait WeatherProvider {
    /// Current conditions at the coordinates.
    fn current_weather(&mut self, latitude: f64, longitude: f64)
    -> Result<WeatherData, WeatherError>;

    /// 5-day/3-hour forecast at the coordinates.
    fn forecast(&mut self, latitude: f64, longitude: f64)
    -> Result<WeatherForecast, WeatherError>;
}

/// Weather cache for one session.
pub struct WeatherStation<P: WeatherProvider> {
    provider: P,
    current: Option<WeatherData>,
    forecast: Option<WeatherForecast>,
    last_error: Option<String>,
}

impl<P: WeatherProvider> WeatherStation<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
            forecast: None,
            last_error: None,
        }
    }

    /// Fetches both current conditions and the forecast for the
    /// coordinates, replacing the cache on success.
    ///
    /// # Errors
    ///
    /// Propagates the provider failure after recording it; cached data
    /// from the previous successful refresh is kept.
    pub fn refresh(&mut self, latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        let fetched = self
            .provider
            .forecast(latitude, longitude)
            .and_then(|forecast| {
                let current = self.provider.current_weather(latitude, longitude)?;
                Ok((current, forecast))
            });

        match fetched {
            Ok((current, forecast)) => {
                self.current = Some(current);
                self.forecast = Some(forecast);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "weather refresh failed, keeping cached data");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&WeatherData> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> Option<&WeatherForecast> {
        self.forecast.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
