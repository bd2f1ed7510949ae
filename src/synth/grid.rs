//! Synthetic DISCOM records, grid connections, and monthly settlements.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use rand::{Rng, rngs::StdRng};

use super::types::base36_id;
use crate::types::{
    ApprovalStatus, CURRENT_USER, ConnectionType, DiscomInfo, DiscomStatus,
    EnergySettlement, GridConnection, SettlementStatus, round2,
};

struct DiscomSeed {
    name: &'static str,
    code: &'static str,
    region: &'static str,
    areas: &'static [&'static str],
}

/// The five utilities offered for interconnection.
const DISCOM_CATALOG: &[DiscomSeed] = &[
    DiscomSeed {
        name: "Maharashtra State Electricity Distribution Co. Ltd.",
        code: "MSEDCL",
        region: "Maharashtra",
        areas: &["Mumbai", "Pune", "Nagpur", "Aurangabad"],
    },
    DiscomSeed {
        name: "Tata Power Delhi Distribution Ltd.",
        code: "TPDDL",
        region: "Delhi",
        areas: &["North Delhi", "Northwest Delhi"],
    },
    DiscomSeed {
        name: "BSES Rajdhani Power Ltd.",
        code: "BRPL",
        region: "Delhi",
        areas: &["South Delhi", "West Delhi"],
    },
    DiscomSeed {
        name: "BSES Yamuna Power Ltd.",
        code: "BYPL",
        region: "Delhi",
        areas: &["East Delhi", "Central Delhi"],
    },
    DiscomSeed {
        name: "Bangalore Electricity Supply Company",
        code: "BESCOM",
        region: "Karnataka",
        areas: &["Bangalore Urban", "Bangalore Rural", "Chikkaballapura", "Kolar"],
    },
];

/// Maps the utility catalog to records with synthesized contact fields.
/// 80% of utilities report an active interconnection desk.
pub fn discoms(rng: &mut StdRng) -> Vec<DiscomInfo> {
    DISCOM_CATALOG
        .iter()
        .map(|seed| DiscomInfo {
            id: base36_id(rng),
            name: seed.name.to_string(),
            code: seed.code.to_string(),
            region: seed.region.to_string(),
            contact_email: format!("contact@{}.in", seed.code.to_lowercase()),
            contact_phone: format!(
                "1800{}{}",
                rng.random_range(100..1000),
                rng.random_range(1000..10_000)
            ),
            serving_areas: seed.areas.iter().map(|a| a.to_string()).collect(),
            connection_status: if rng.random::<f64>() > 0.8 {
                DiscomStatus::Pending
            } else {
                DiscomStatus::Active
            },
        })
        .collect()
}

/// Fabricates one interconnection record for a (meter, DISCOM) pair.
///
/// 70% of connections come back approved; approved ones get an approval
/// date 15–44 days after application and a 5-year contract.
pub fn grid_connection(
    rng: &mut StdRng,
    now: DateTime<Utc>,
    meter_id: &str,
    discom_id: &str,
) -> GridConnection {
    let months_back = rng.random_range(0..12u32);
    let application_date = now
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(now);

    let approval_status = if rng.random::<f64>() > 0.3 {
        ApprovalStatus::Approved
    } else if rng.random::<f64>() > 0.5 {
        ApprovalStatus::Pending
    } else {
        ApprovalStatus::Rejected
    };

    let (approval_date, contract_end_date) = if approval_status == ApprovalStatus::Approved {
        let approved = application_date + Duration::days(rng.random_range(15..45));
        let contract_end = approved.checked_add_months(Months::new(60)).unwrap_or(approved);
        (Some(approved), Some(contract_end))
    } else {
        (None, None)
    };

    let connection_type = if rng.random::<f64>() > 0.6 {
        ConnectionType::NetMetering
    } else if rng.random::<f64>() > 0.5 {
        ConnectionType::GrossMetering
    } else {
        ConnectionType::VirtualNetMetering
    };

    GridConnection {
        id: base36_id(rng),
        user_id: CURRENT_USER.to_string(),
        meter_id: meter_id.to_string(),
        discom_id: discom_id.to_string(),
        connection_type,
        approval_status,
        max_export_capacity_kw: rng.random_range(5..15) as f64,
        application_date,
        approval_date,
        contract_end_date,
        monthly_fees: round2(rng.random::<f64>() * 50.0 + 100.0),
    }
}

/// Net amount owed for one billing period.
///
/// Import-heavy periods bill at the import rate; net-export periods credit
/// the user at the export rate, producing a negative amount.
pub fn settlement_amount(net_energy_kwh: f64, import_rate: f64, export_rate: f64) -> f64 {
    if net_energy_kwh > 0.0 {
        round2(net_energy_kwh * import_rate)
    } else {
        round2(net_energy_kwh * export_rate)
    }
}

/// Anchors a billing period end on the 28th of the month `months_back`
/// months before now.
fn period_end(now: DateTime<Utc>, months_back: u32) -> DateTime<Utc> {
    let shifted = now.checked_sub_months(Months::new(months_back)).unwrap_or(now);
    shifted.with_day(28).unwrap_or(shifted)
}

/// Fabricates `count` monthly settlements for a connection, newest period
/// first. Only the most recent period is still in "calculated" state; all
/// earlier bills are paid.
pub fn settlements(
    rng: &mut StdRng,
    now: DateTime<Utc>,
    grid_connection_id: &str,
    count: usize,
) -> Vec<EnergySettlement> {
    (0..count)
        .map(|i| {
            let end = period_end(now, i as u32);
            let start_anchor = end.checked_sub_months(Months::new(1)).unwrap_or(end);
            // Day 29 of the previous month; months without one fall back to 28.
            let start = start_anchor
                .with_day(29)
                .unwrap_or(start_anchor);

            let imported = rng.random_range(100..400) as f64;
            let exported = rng.random_range(50..300) as f64;
            let net = imported - exported;

            let import_rate = round2(rng.random::<f64>() * 2.0 + 6.0);
            let export_rate = round2(rng.random::<f64>() + 3.0);

            let is_paid = i > 0;
            let due = end + Duration::days(21);
            let payment_completed_date = if is_paid {
                Some(due - Duration::days(rng.random_range(0..20)))
            } else {
                None
            };

            EnergySettlement {
                id: base36_id(rng),
                grid_connection_id: grid_connection_id.to_string(),
                billing_period_start: start,
                billing_period_end: end,
                energy_imported_kwh: imported,
                energy_exported_kwh: exported,
                net_energy_kwh: net,
                import_rate,
                export_rate,
                net_amount: settlement_amount(net, import_rate, export_rate),
                currency: "INR".to_string(),
                status: if is_paid {
                    SettlementStatus::Paid
                } else {
                    SettlementStatus::Calculated
                },
                payment_due_date: due,
                payment_completed_date,
            }
        })
        .collect()
}
