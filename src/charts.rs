//! Derived chart series built from the generators: historical prices,
//! per-user consumption and savings, and timeframe price history.

use chrono::{DateTime, Duration, Months, Utc};
use rand::{Rng, rngs::StdRng};
use serde::Serialize;

use crate::types::round2;

/// One labelled sample on a chart axis.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A named series of chart points.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

/// Share of total generation attributed to one source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceShare {
    pub name: String,
    pub share_pct: f64,
}

/// Aggregated per-user dashboard series.
#[derive(Debug, Clone, Serialize)]
pub struct UserChartData {
    pub daily_consumption: ChartSeries,
    pub source_breakdown: Vec<SourceShare>,
    pub savings_history: ChartSeries,
}

/// One step of a timeframe price history.
#[derive(Debug, Clone, Serialize)]
pub struct PricePoint {
    pub step: usize,
    pub price: f64,
}

/// Builds the three-source historical price chart over `days + 1` samples.
///
/// A shared downward trend factor `1 - i/(2*days)` applies to every series;
/// noise in `(-0.15, 0.15)` is drawn independently per series per point.
pub fn historical_price_series(
    rng: &mut StdRng,
    now: DateTime<Utc>,
    days: usize,
) -> Vec<ChartSeries> {
    let bases = [("Solar", 3.2), ("Wind", 3.5), ("Hydro", 4.0)];
    let start = now - Duration::days(days as i64);

    let mut series: Vec<ChartSeries> = bases
        .iter()
        .map(|(name, _)| ChartSeries {
            name: name.to_string(),
            points: Vec::with_capacity(days + 1),
        })
        .collect();

    for i in 0..=days {
        let date = start + Duration::days(i as i64);
        let label = date.format("%Y-%m-%d").to_string();
        let trend = 1.0 - i as f64 / (days as f64 * 2.0);
        for (slot, (_, base)) in series.iter_mut().zip(bases.iter()) {
            let noise = (rng.random::<f64>() - 0.5) * 0.3;
            slot.points.push(ChartPoint {
                label: label.clone(),
                value: round2(base * trend + noise),
            });
        }
    }

    series
}

/// Builds the per-user dashboard series: 30-day consumption, a fixed
/// source breakdown, and 6 months of savings.
pub fn user_chart_data(rng: &mut StdRng, now: DateTime<Utc>) -> UserChartData {
    let daily_consumption = ChartSeries {
        name: "Consumption".to_string(),
        points: (0..30)
            .map(|i| {
                let date = now - Duration::days(29 - i as i64);
                ChartPoint {
                    label: date.format("%Y-%m-%d").to_string(),
                    value: rng.random_range(5..20) as f64,
                }
            })
            .collect(),
    };

    let source_breakdown = [
        ("Solar", 45.0),
        ("Wind", 30.0),
        ("Hydro", 15.0),
        ("Biomass", 7.0),
        ("Geothermal", 3.0),
    ]
    .iter()
    .map(|(name, share_pct)| SourceShare {
        name: name.to_string(),
        share_pct: *share_pct,
    })
    .collect();

    let savings_history = ChartSeries {
        name: "Savings".to_string(),
        points: (0..6)
            .map(|i| {
                let month = now
                    .checked_sub_months(Months::new(5 - i as u32))
                    .unwrap_or(now);
                ChartPoint {
                    label: month.format("%b").to_string(),
                    value: rng.random_range(300..800) as f64,
                }
            })
            .collect(),
    };

    UserChartData {
        daily_consumption,
        source_breakdown,
        savings_history,
    }
}

/// Chart windows offered by the price-history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    H24,
    D7,
    D30,
    D90,
    Y1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::H24,
        Timeframe::D7,
        Timeframe::D30,
        Timeframe::D90,
        Timeframe::Y1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::H24 => "24h",
            Timeframe::D7 => "7d",
            Timeframe::D30 => "30d",
            Timeframe::D90 => "90d",
            Timeframe::Y1 => "1y",
        }
    }

    /// (points, base price, volatility, per-step trend) for the window.
    /// The yearly window samples monthly, hence 12 points.
    fn params(self) -> (usize, f64, f64, f64) {
        match self {
            Timeframe::H24 => (24, 3.45, 0.1, -0.005),
            Timeframe::D7 => (7, 3.55, 0.15, -0.01),
            Timeframe::D30 => (30, 3.75, 0.2, -0.015),
            Timeframe::D90 => (90, 3.95, 0.25, -0.02),
            Timeframe::Y1 => (12, 4.25, 0.3, -0.03),
        }
    }
}

/// Builds a drifting price walk for the requested window: per-step trend
/// plus bounded noise scaled by the window's volatility.
pub fn price_history(rng: &mut StdRng, timeframe: Timeframe) -> Vec<PricePoint> {
    let (points, base, volatility, trend) = timeframe.params();
    (0..points)
        .map(|i| {
            let noise = (rng.random::<f64>() - 0.5) * volatility;
            PricePoint {
                step: i,
                price: round2(base + trend * i as f64 + noise),
            }
        })
        .collect()
}
