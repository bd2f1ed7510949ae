//! Synthetic marketplace data: listings, transactions, and price predictions.

use chrono::{DateTime, Timelike, Utc};
use rand::{Rng, rngs::StdRng};

use super::types::{base36_id, future_date, recent_date, weighted_source};
use crate::types::{
    EnergyListing, EnergyPrediction, Recommendation, Transaction, TransactionStatus, round2,
};

/// Anchor price per kWh for the prediction horizon.
pub const PREDICTION_BASE_PRICE: f64 = 3.5;

const SELLER_NAMES: &[&str] = &[
    "SolarTech Industries",
    "WindPower Solutions",
    "GreenEnergy Co.",
    "EcoElectric",
    "SunHarvest Power",
    "WindFlow Energy",
    "HydroGen Systems",
    "BioMass Innovations",
    "GeoTherm Solutions",
    "CleanCurrent Energy",
];

const LOCATIONS: &[&str] = &[
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

/// Picks a fixed catalog entry at uniform random.
fn pick<'a>(rng: &mut StdRng, catalog: &[&'a str]) -> &'a str {
    catalog[rng.random_range(0..catalog.len())]
}

/// Fabricates `count` active sell listings.
///
/// Source follows the weighted mix; price is the per-source anchor perturbed
/// by `uniform(-0.5, 0.5)`; quantity is a whole number in `[100, 1100)` kWh.
pub fn listings(rng: &mut StdRng, now: DateTime<Utc>, count: usize) -> Vec<EnergyListing> {
    (0..count)
        .map(|_| {
            let source = weighted_source(rng);
            let quantity = rng.random_range(100..1100) as f64;
            let price = round2(source.base_price() + (rng.random::<f64>() - 0.5));
            EnergyListing {
                id: base36_id(rng),
                seller_id: base36_id(rng),
                seller_name: pick(rng, SELLER_NAMES).to_string(),
                source,
                quantity_kwh: quantity,
                price_per_kwh: price,
                location: pick(rng, LOCATIONS).to_string(),
                timestamp: recent_date(rng, now),
                co2_offset_kg: quantity * source.co2_per_kwh(),
            }
        })
        .collect()
}

/// Fabricates `count` recent transactions, 90% of them completed and the
/// remainder split evenly between pending and failed.
pub fn transactions(rng: &mut StdRng, now: DateTime<Utc>, count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|_| {
            let quantity = rng.random_range(50..550) as f64;
            let unit_price = round2(rng.random::<f64>() * 2.0 + 2.0);
            let status = if rng.random::<f64>() > 0.1 {
                TransactionStatus::Completed
            } else if rng.random::<f64>() > 0.5 {
                TransactionStatus::Pending
            } else {
                TransactionStatus::Failed
            };
            Transaction {
                id: base36_id(rng),
                buyer_id: base36_id(rng),
                seller_id: base36_id(rng),
                listing_id: base36_id(rng),
                quantity_kwh: quantity,
                unit_price,
                total_price: round2(quantity * unit_price),
                timestamp: recent_date(rng, now),
                status,
            }
        })
        .collect()
}

/// Peak multiplier by hour of day: morning and evening peaks, night trough.
fn time_of_day_factor(hour: u32) -> f64 {
    match hour {
        7..=10 => 1.2,
        18..=22 => 1.3,
        0..=5 => 0.8,
        _ => 1.0,
    }
}

/// Classifies a predicted price against the anchor.
///
/// Thresholds are strict: exactly 95% of the anchor is a hold, not a buy,
/// and exactly 105% is a hold, not a sell.
pub fn recommend(predicted_price: f64, base_price: f64) -> Recommendation {
    if predicted_price < base_price * 0.95 {
        Recommendation::Buy
    } else if predicted_price > base_price * 1.05 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// Produces one prediction per hour over the horizon.
///
/// Confidence decays linearly from 0.95 toward a floor of 0.5 as the
/// horizon stretches; near-term forecasts are the most confident.
pub fn predictions(
    rng: &mut StdRng,
    now: DateTime<Utc>,
    hours_ahead: usize,
) -> Vec<EnergyPrediction> {
    (0..hours_ahead)
        .map(|i| {
            let hour_of_day = (now.hour() + i as u32) % 24;
            let noise = (rng.random::<f64>() - 0.5) * 0.4;
            let predicted_price =
                round2(PREDICTION_BASE_PRICE * time_of_day_factor(hour_of_day) + noise);
            let confidence =
                (0.95 - (i as f64 / hours_ahead as f64) * 0.45).max(0.5);
            EnergyPrediction {
                timestamp: future_date(now, i as i64 + 1),
                predicted_price,
                confidence,
                recommendation: recommend(predicted_price, PREDICTION_BASE_PRICE),
            }
        })
        .collect()
}
