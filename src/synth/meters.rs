//! Synthetic smart-meter fleet and hourly reading profiles.

use chrono::{DateTime, Duration, Months, Utc};
use rand::{Rng, rngs::StdRng};

use super::types::base36_id;
use crate::types::{
    CURRENT_USER, GridStatus, MeterKind, MeterLocation, MeterStatus, SmartMeter,
    SmartMeterReading, round2,
};

/// Meter vendor catalog: manufacturer paired with its model range.
const MANUFACTURERS: &[(&str, &[&str])] = &[
    ("SmartGrid Solutions", &["SG-100", "SG-200", "SG-300"]),
    ("EnergyMetrix", &["EM-Basic", "EM-Advanced", "EM-Pro"]),
    ("PowerTrack Systems", &["PT1000", "PT2000", "PT3000"]),
    ("VoltWise", &["VW-Residential", "VW-Commercial", "VW-Industrial"]),
];

const ADDRESSES: &[&str] = &[
    "Mumbai, Maharashtra",
    "Delhi, Delhi",
    "Bengaluru, Karnataka",
    "Hyderabad, Telangana",
    "Chennai, Tamil Nadu",
    "Pune, Maharashtra",
    "Ahmedabad, Gujarat",
    "Jaipur, Rajasthan",
    "Surat, Gujarat",
    "Kolkata, West Bengal",
];

/// Fabricates `count` smart meters registered to the session user.
///
/// Installation dates fall within the past three years; 90% of meters
/// report online, the rest split between offline and maintenance.
pub fn smart_meters(rng: &mut StdRng, now: DateTime<Utc>, count: usize) -> Vec<SmartMeter> {
    (0..count)
        .map(|_| {
            let (manufacturer, models) = MANUFACTURERS[rng.random_range(0..MANUFACTURERS.len())];
            let model = models[rng.random_range(0..models.len())];
            let years_back = rng.random_range(0..3u32);
            let installation_date = now
                .checked_sub_months(Months::new(years_back * 12))
                .unwrap_or(now);
            let prefix: String = manufacturer.chars().take(2).collect::<String>().to_uppercase();
            let status = if rng.random::<f64>() > 0.1 {
                MeterStatus::Online
            } else if rng.random::<f64>() > 0.5 {
                MeterStatus::Offline
            } else {
                MeterStatus::Maintenance
            };
            let kind = if rng.random::<f64>() > 0.7 {
                MeterKind::Residential
            } else if rng.random::<f64>() > 0.5 {
                MeterKind::Commercial
            } else {
                MeterKind::Industrial
            };
            SmartMeter {
                id: base36_id(rng),
                user_id: CURRENT_USER.to_string(),
                device_id: format!("{prefix}{}", rng.random_range(0..10_000)),
                manufacturer: manufacturer.to_string(),
                model: model.to_string(),
                installation_date,
                last_reading: None,
                status,
                location: MeterLocation {
                    address: ADDRESSES[rng.random_range(0..ADDRESSES.len())].to_string(),
                    latitude: 18.52 + rng.random::<f64>() * 10.0,
                    longitude: 73.85 + rng.random::<f64>() * 10.0,
                },
                kind,
            }
        })
        .collect()
}

/// True during the two household demand peaks.
fn is_peak_hour(hour: u32) -> bool {
    (7..=10).contains(&hour) || (18..=22).contains(&hour)
}

/// Fabricates 24 hourly readings per requested day, newest first.
///
/// Generation follows a daylight bell between hours 6 and 18 peaking at
/// noon with a small nighttime baseline; consumption is elevated in the
/// morning and evening peak windows.
pub fn meter_readings(
    rng: &mut StdRng,
    now: DateTime<Utc>,
    meter_id: &str,
    days: usize,
) -> Vec<SmartMeterReading> {
    let mut readings = Vec::with_capacity(days * 24);

    for day in 0..days {
        let anchor = now - Duration::days(day as i64);
        for hour in 0..24u32 {
            let Some(naive) = anchor.date_naive().and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let timestamp = naive.and_utc();

            let is_daylight = (6..=18).contains(&hour);
            let base_generation = if is_daylight { 2.5 } else { 0.2 };
            let bell = if is_daylight {
                1.0 - (12.0 - hour as f64).abs() / 10.0
            } else {
                1.0
            };
            let generation =
                round2(base_generation * bell * (1.0 + rng.random::<f64>() * 0.3));

            let peak = is_peak_hour(hour);
            let base_consumption = if peak { 3.5 } else { 1.2 };
            let consumption =
                round2(base_consumption * (1.0 + rng.random::<f64>() * 0.3));

            let peak_demand = if peak {
                round2(base_consumption * 1.2)
            } else {
                round2(base_consumption)
            };

            readings.push(SmartMeterReading {
                id: base36_id(rng),
                meter_id: meter_id.to_string(),
                timestamp,
                consumption_kwh: consumption,
                generation_kwh: generation,
                net_usage_kwh: round2(consumption - generation),
                peak_demand_kw: peak_demand,
                voltage: rng.random_range(220..230),
                grid_status: if rng.random::<f64>() > 0.05 {
                    GridStatus::Connected
                } else {
                    GridStatus::IslandMode
                },
            });
        }
    }

    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    readings
}
