//! Seeded weather provider for offline sessions.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::types::{ForecastEntry, WeatherData, WeatherForecast, group_by_day};
use super::{WeatherError, WeatherProvider};

/// Forecast horizon: 5 days of 3-hour steps.
const FORECAST_STEPS: usize = 40;
const FORECAST_STEP_HOURS: i64 = 3;

/// Synthesizes plausible tropical-latitude weather from a seeded RNG.
///
/// The clock is injected at construction so tests can pin both the seed
/// and the observation times; production passes `Utc::now()`.
pub struct SimulatedSky {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl SimulatedSky {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    /// Diurnal temperature swing peaking mid-afternoon.
    fn diurnal_offset(hour: u32) -> f64 {
        let phase = (hour as f64 - 14.0) / 24.0 * std::f64::consts::TAU;
        6.0 * phase.cos()
    }

    fn description_for(clouds_pct: f64) -> &'static str {
        if clouds_pct < 20.0 {
            "clear sky"
        } else if clouds_pct < 50.0 {
            "scattered clouds"
        } else if clouds_pct < 80.0 {
            "broken clouds"
        } else {
            "overcast clouds"
        }
    }

    fn observation(&mut self, latitude: f64, at: DateTime<Utc>) -> WeatherData {
        // Warmer near the equator; the band matters more than the exact lapse.
        let base_temp = 32.0 - latitude.abs() * 0.25;
        let temperature_c = base_temp
            + Self::diurnal_offset(at.hour())
            + (self.rng.random::<f64>() - 0.5) * 3.0;
        let clouds_pct = self.rng.random_range(0.0..100.0);
        let humidity_pct = self.rng.random_range(40.0..90.0);

        let day = at.date_naive();
        let sunrise = day
            .and_hms_opt(6, 0, 0)
            .map(|n| n.and_utc())
            .unwrap_or(at);
        let sunset = day
            .and_hms_opt(18, 0, 0)
            .map(|n| n.and_utc())
            .unwrap_or(at);

        WeatherData {
            temperature_c,
            feels_like_c: temperature_c + humidity_pct / 100.0 * 2.0,
            humidity_pct,
            wind_speed_ms: self.rng.random_range(1.0..12.0),
            wind_direction_deg: self.rng.random_range(0.0..360.0),
            description: Self::description_for(clouds_pct).to_string(),
            clouds_pct,
            pressure_hpa: self.rng.random_range(1000.0..1020.0),
            visibility_m: self.rng.random_range(8000.0..10_000.0),
            sunrise,
            sunset,
            timestamp: at,
        }
    }
}

impl WeatherProvider for SimulatedSky {
    fn current_weather(
        &mut self,
        latitude: f64,
        _longitude: f64,
    ) -> Result<WeatherData, WeatherError> {
        Ok(self.observation(latitude, self.now))
    }

    fn forecast(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherForecast, WeatherError> {
        let current = self.current_weather(latitude, longitude)?;

        let hourly: Vec<ForecastEntry> = (0..FORECAST_STEPS)
            .map(|i| {
                let at = self.now + Duration::hours(FORECAST_STEP_HOURS * (i as i64 + 1));
                let weather = self.observation(latitude, at);
                let precipitation_pct = weather.clouds_pct * self.rng.random::<f64>();
                ForecastEntry {
                    weather,
                    precipitation_pct,
                }
            })
            .collect();

        let daily = group_by_day(&hourly);

        Ok(WeatherForecast {
            current,
            hourly,
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn forecast_covers_five_days_of_3h_steps() {
        let mut sky = SimulatedSky::new(42, now());
        let forecast = sky.forecast(19.076, 72.8777).expect("simulated fetch");
        assert_eq!(forecast.hourly.len(), 40);
        assert_eq!(
            forecast.hourly[0].weather.timestamp - now(),
            Duration::hours(3)
        );
        assert_eq!(
            forecast.hourly[39].weather.timestamp - now(),
            Duration::hours(120)
        );
        // 5 days plus the partial tail day.
        assert!((5..=6).contains(&forecast.daily.len()));
    }

    #[test]
    fn observations_stay_in_plausible_bands() {
        let mut sky = SimulatedSky::new(1, now());
        let forecast = sky.forecast(19.076, 72.8777).expect("simulated fetch");
        for entry in &forecast.hourly {
            let w = &entry.weather;
            assert!(w.clouds_pct >= 0.0 && w.clouds_pct < 100.0);
            assert!(w.humidity_pct >= 40.0 && w.humidity_pct < 90.0);
            assert!(w.wind_speed_ms >= 1.0 && w.wind_speed_ms < 12.0);
            assert!(w.temperature_c > 10.0 && w.temperature_c < 45.0);
            assert!(entry.precipitation_pct >= 0.0 && entry.precipitation_pct <= 100.0);
        }
    }

    #[test]
    fn description_matches_cloud_bucket() {
        let mut sky = SimulatedSky::new(2, now());
        let w = sky.current_weather(19.076, 72.8777).expect("fetch");
        assert_eq!(w.description, SimulatedSky::description_for(w.clouds_pct));
    }

    #[test]
    fn same_seed_and_clock_reproduce_observations() {
        let mut a = SimulatedSky::new(9, now());
        let mut b = SimulatedSky::new(9, now());
        let wa = a.current_weather(19.0, 72.0).expect("a");
        let wb = b.current_weather(19.0, 72.0).expect("b");
        assert_eq!(wa.temperature_c, wb.temperature_c);
        assert_eq!(wa.clouds_pct, wb.clouds_pct);
        assert_eq!(wa.wind_speed_ms, wb.wind_speed_ms);
    }

    #[test]
    fn afternoon_runs_warmer_than_small_hours() {
        // Diurnal term alone: +6 at 14:00, -6 at 02:00; noise is ±1.5.
        let afternoon = SimulatedSky::diurnal_offset(14);
        let night = SimulatedSky::diurnal_offset(2);
        assert!(afternoon > night + 10.0);
    }
}
