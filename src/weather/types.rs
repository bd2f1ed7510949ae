//! Weather observation and forecast shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single weather observation.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherData {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub wind_direction_deg: f64,
    pub description: String,
    pub clouds_pct: f64,
    pub pressure_hpa: f64,
    pub visibility_m: f64,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

/// One forecast step: an observation plus precipitation probability.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastEntry {
    pub weather: WeatherData,
    pub precipitation_pct: f64,
}

/// Per-day rollup of the hourly forecast.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub description: String,
    pub precipitation_pct: f64,
}

/// Current conditions plus the hourly and daily forecast windows.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherForecast {
    pub current: WeatherData,
    pub hourly: Vec<ForecastEntry>,
    pub daily: Vec<DailySummary>,
}

/// Groups hourly forecast entries by calendar day.
///
/// Each day keeps its first entry's description, the min/max temperature
/// across the day, and the highest precipitation probability seen.
pub fn group_by_day(hourly: &[ForecastEntry]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();

    for entry in hourly {
        let date = entry.weather.timestamp.format("%Y-%m-%d").to_string();
        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.min_temp_c = day.min_temp_c.min(entry.weather.temperature_c);
                day.max_temp_c = day.max_temp_c.max(entry.weather.temperature_c);
                day.precipitation_pct = day.precipitation_pct.max(entry.precipitation_pct);
            }
            None => days.push(DailySummary {
                date,
                min_temp_c: entry.weather.temperature_c,
                max_temp_c: entry.weather.temperature_c,
                description: entry.weather.description.clone(),
                precipitation_pct: entry.precipitation_pct,
            }),
        }
    }

    days
}
