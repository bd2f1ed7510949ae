//! Weather-based generation-potential scoring.
//!
//! Maps an observation to a 0–100 score of how favorable conditions are
//! for a given source right now.

use chrono::Timelike;

use super::types::WeatherData;
use crate::types::EnergySource;

/// Turbine cut-in wind speed (m/s); below this a turbine produces nothing.
const WIND_CUT_IN_MS: f64 = 3.0;
/// Turbine cut-out wind speed (m/s); treated as full output.
const WIND_CUT_OUT_MS: f64 = 25.0;

/// Scores current generation conditions for `source` on a 0–100 scale.
///
/// Sources without a weather-driven model score zero.
pub fn generation_potential(weather: &WeatherData, source: EnergySource) -> u32 {
    match source {
        EnergySource::Solar => solar_potential(weather),
        EnergySource::Wind => wind_potential(weather),
        EnergySource::Hydro => hydro_potential(weather),
        _ => 0,
    }
}

/// Cloud cover attenuates a time-of-day irradiance curve.
fn solar_potential(weather: &WeatherData) -> u32 {
    let cloud_factor = 1.0 - weather.clouds_pct / 100.0;
    let time_factor = time_of_day_factor(weather);
    (cloud_factor * time_factor * 100.0).round() as u32
}

/// Linear ramp between cut-in and cut-out speeds.
fn wind_potential(weather: &WeatherData) -> u32 {
    let wind = weather.wind_speed_ms.clamp(WIND_CUT_IN_MS, WIND_CUT_OUT_MS);
    ((wind - WIND_CUT_IN_MS) / (WIND_CUT_OUT_MS - WIND_CUT_IN_MS) * 100.0).round() as u32
}

/// Humidity as a proxy for water availability.
fn hydro_potential(weather: &WeatherData) -> u32 {
    (weather.humidity_pct * 0.8).round() as u32
}

/// Irradiance fraction for the observation hour.
///
/// Zero outside sunrise..sunset, full between 10:00 and 14:00, linear
/// ramps in the shoulders.
fn time_of_day_factor(weather: &WeatherData) -> f64 {
    let hour = weather.timestamp.hour() as i64;
    let sunrise = weather.sunrise.hour() as i64;
    let sunset = weather.sunset.hour() as i64;

    if hour < sunrise || hour > sunset {
        return 0.0;
    }
    if (10..=14).contains(&hour) {
        return 1.0;
    }
    if hour < 10 {
        (hour - sunrise) as f64 / (10 - sunrise).max(1) as f64
    } else {
        (sunset - hour) as f64 / (sunset - 14).max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn observation(hour: u32) -> WeatherData {
        let at: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap();
        WeatherData {
            temperature_c: 28.0,
            feels_like_c: 29.0,
            humidity_pct: 50.0,
            wind_speed_ms: 5.0,
            wind_direction_deg: 90.0,
            description: "clear sky".to_string(),
            clouds_pct: 0.0,
            pressure_hpa: 1012.0,
            visibility_m: 10_000.0,
            sunrise: Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap(),
            timestamp: at,
        }
    }

    #[test]
    fn solar_is_zero_at_night() {
        let mut w = observation(2);
        w.clouds_pct = 0.0;
        assert_eq!(generation_potential(&w, EnergySource::Solar), 0);
        let w = observation(22);
        assert_eq!(generation_potential(&w, EnergySource::Solar), 0);
    }

    #[test]
    fn solar_is_full_under_clear_noon_sky() {
        let w = observation(12);
        assert_eq!(generation_potential(&w, EnergySource::Solar), 100);
    }

    #[test]
    fn solar_scales_with_cloud_cover() {
        let mut w = observation(12);
        w.clouds_pct = 50.0;
        assert_eq!(generation_potential(&w, EnergySource::Solar), 50);
        w.clouds_pct = 100.0;
        assert_eq!(generation_potential(&w, EnergySource::Solar), 0);
    }

    #[test]
    fn solar_ramps_through_the_morning() {
        // Sunrise 6, plateau from 10: hour 8 sits halfway up the ramp.
        let w = observation(8);
        assert_eq!(generation_potential(&w, EnergySource::Solar), 50);
        let w = observation(6);
        assert_eq!(generation_potential(&w, EnergySource::Solar), 0);
    }

    #[test]
    fn solar_ramps_down_toward_sunset() {
        // Plateau ends at 14, sunset 18: hour 16 is halfway down.
        let w = observation(16);
        assert_eq!(generation_potential(&w, EnergySource::Solar), 50);
    }

    #[test]
    fn wind_ramp_between_cut_in_and_cut_out() {
        let mut w = observation(12);
        w.wind_speed_ms = 3.0;
        assert_eq!(generation_potential(&w, EnergySource::Wind), 0);
        w.wind_speed_ms = 25.0;
        assert_eq!(generation_potential(&w, EnergySource::Wind), 100);
        w.wind_speed_ms = 14.0;
        assert_eq!(generation_potential(&w, EnergySource::Wind), 50);
        // Below cut-in and above cut-out clamp.
        w.wind_speed_ms = 1.0;
        assert_eq!(generation_potential(&w, EnergySource::Wind), 0);
        w.wind_speed_ms = 40.0;
        assert_eq!(generation_potential(&w, EnergySource::Wind), 100);
    }

    #[test]
    fn hydro_follows_humidity() {
        let mut w = observation(12);
        w.humidity_pct = 50.0;
        assert_eq!(generation_potential(&w, EnergySource::Hydro), 40);
        w.humidity_pct = 100.0;
        assert_eq!(generation_potential(&w, EnergySource::Hydro), 80);
    }

    #[test]
    fn sources_without_a_model_score_zero() {
        let w = observation(12);
        assert_eq!(generation_potential(&w, EnergySource::Biomass), 0);
        assert_eq!(generation_potential(&w, EnergySource::Geothermal), 0);
    }
}
