//! Core domain types shared by generators, containers, and exporters.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// User id attributed to operations performed by the session owner.
pub const CURRENT_USER: &str = "current-user";

/// Rounds a currency amount to two decimal places (half away from zero).
///
/// Every wallet, price, and settlement figure in the market goes through
/// this before being stored or compared.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renewable energy source traded on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Solar,
    Wind,
    Hydro,
    Biomass,
    Geothermal,
}

impl EnergySource {
    /// All tradable sources, in listing-mix order.
    pub const ALL: [EnergySource; 5] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Hydro,
        EnergySource::Biomass,
        EnergySource::Geothermal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergySource::Solar => "solar",
            EnergySource::Wind => "wind",
            EnergySource::Hydro => "hydro",
            EnergySource::Biomass => "biomass",
            EnergySource::Geothermal => "geothermal",
        }
    }

    /// Anchor ask price per kWh around which listing prices vary.
    pub fn base_price(self) -> f64 {
        match self {
            EnergySource::Solar => 3.2,
            EnergySource::Wind => 3.5,
            EnergySource::Hydro => 4.0,
            EnergySource::Biomass => 4.2,
            EnergySource::Geothermal => 4.5,
        }
    }

    /// Estimated avoided emissions in kg CO2 per traded kWh.
    pub fn co2_per_kwh(self) -> f64 {
        match self {
            EnergySource::Solar => 0.5,
            _ => 0.4,
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active sell offer on the marketplace.
///
/// Invariant: `quantity_kwh > 0`. A listing is removed from the active set
/// once a purchase drains it to zero.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyListing {
    pub id: String,
    pub seller_id: String,
    pub seller_name: String,
    pub source: EnergySource,
    pub quantity_kwh: f64,
    pub price_per_kwh: f64,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub co2_offset_kg: f64,
}

impl fmt::Display for EnergyListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>7.0} kWh @ {:>5.2}/kWh  {:<10} {} ({})",
            self.id,
            self.quantity_kwh,
            self.price_per_kwh,
            self.source,
            self.seller_name,
            self.location,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Record of a settled purchase. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub listing_id: String,
    pub quantity_kwh: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

/// Session wallet. Debited on purchase; the current market model has no
/// credit path for sellers.
#[derive(Debug, Clone, Serialize)]
pub struct WalletBalance {
    pub available: f64,
    pub pending: f64,
    pub currency: String,
}

/// Monotonic per-session trading counters.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub energy_bought_kwh: f64,
    pub energy_sold_kwh: f64,
    pub co2_offset_kg: f64,
    pub savings_to_date: f64,
    pub transactions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

/// Hourly price forecast point. Derived, never persisted; recomputed on
/// every market refresh.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyPrediction {
    pub timestamp: DateTime<Utc>,
    pub predicted_price: f64,
    pub confidence: f64,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterStatus {
    Online,
    Offline,
    Maintenance,
}

impl MeterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MeterStatus::Online => "online",
            MeterStatus::Offline => "offline",
            MeterStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterKind {
    Residential,
    Commercial,
    Industrial,
}

/// Physical placement of an installed meter.
#[derive(Debug, Clone, Serialize)]
pub struct MeterLocation {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A registered smart meter belonging to the session user.
#[derive(Debug, Clone, Serialize)]
pub struct SmartMeter {
    pub id: String,
    pub user_id: String,
    pub device_id: String,
    pub manufacturer: String,
    pub model: String,
    pub installation_date: DateTime<Utc>,
    pub last_reading: Option<SmartMeterReading>,
    pub status: MeterStatus,
    pub location: MeterLocation,
    pub kind: MeterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridStatus {
    Connected,
    IslandMode,
}

impl GridStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GridStatus::Connected => "connected",
            GridStatus::IslandMode => "island-mode",
        }
    }
}

/// One hourly meter sample. `net_usage_kwh = consumption - generation`.
#[derive(Debug, Clone, Serialize)]
pub struct SmartMeterReading {
    pub id: String,
    pub meter_id: String,
    pub timestamp: DateTime<Utc>,
    pub consumption_kwh: f64,
    pub generation_kwh: f64,
    pub net_usage_kwh: f64,
    pub peak_demand_kw: f64,
    pub voltage: u32,
    pub grid_status: GridStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscomStatus {
    Active,
    Pending,
    Inactive,
}

/// Distribution company handling grid interconnection and billing.
#[derive(Debug, Clone, Serialize)]
pub struct DiscomInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub region: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub serving_areas: Vec<String>,
    pub connection_status: DiscomStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    NetMetering,
    GrossMetering,
    VirtualNetMetering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Interconnection agreement between a meter and a DISCOM.
///
/// `approval_date` and `contract_end_date` are populated only while
/// `approval_status` is `Approved` (contract runs 5 years from approval).
#[derive(Debug, Clone, Serialize)]
pub struct GridConnection {
    pub id: String,
    pub user_id: String,
    pub meter_id: String,
    pub discom_id: String,
    pub connection_type: ConnectionType,
    pub approval_status: ApprovalStatus,
    pub max_export_capacity_kw: f64,
    pub application_date: DateTime<Utc>,
    pub approval_date: Option<DateTime<Utc>>,
    pub contract_end_date: Option<DateTime<Utc>>,
    pub monthly_fees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Calculated,
    Invoiced,
    Paid,
}

impl SettlementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SettlementStatus::Calculated => "calculated",
            SettlementStatus::Invoiced => "invoiced",
            SettlementStatus::Paid => "paid",
        }
    }
}

/// Monthly net-metering bill for one grid connection.
///
/// `net_amount` is negative when the period net-exported, crediting the
/// user at the export rate.
#[derive(Debug, Clone, Serialize)]
pub struct EnergySettlement {
    pub id: String,
    pub grid_connection_id: String,
    pub billing_period_start: DateTime<Utc>,
    pub billing_period_end: DateTime<Utc>,
    pub energy_imported_kwh: f64,
    pub energy_exported_kwh: f64,
    pub net_energy_kwh: f64,
    pub import_rate: f64,
    pub export_rate: f64,
    pub net_amount: f64,
    pub currency: String,
    pub status: SettlementStatus,
    pub payment_due_date: DateTime<Utc>,
    pub payment_completed_date: Option<DateTime<Utc>>,
}

impl fmt::Display for EnergySettlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}  imported={:>4.0} exported={:>4.0} net={:>5.0} kWh  amount={:>9.2} {}  [{}]",
            self.billing_period_start.format("%Y-%m-%d"),
            self.billing_period_end.format("%Y-%m-%d"),
            self.energy_imported_kwh,
            self.energy_exported_kwh,
            self.net_energy_kwh,
            self.net_amount,
            self.currency,
            self.status.as_str(),
        )
    }
}

/// Static catalog entry describing one tradable source on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyTypeProfile {
    pub source: EnergySource,
    pub current_price: f64,
    pub price_change_pct: f64,
    pub availability_pct: f64,
    pub description: &'static str,
}

/// The fixed per-source dashboard catalog.
pub fn energy_type_catalog() -> [EnergyTypeProfile; 5] {
    [
        EnergyTypeProfile {
            source: EnergySource::Solar,
            current_price: 3.24,
            price_change_pct: -2.1,
            availability_pct: 85.0,
            description: "Energy harnessed from the sun using photovoltaic panels.",
        },
        EnergyTypeProfile {
            source: EnergySource::Wind,
            current_price: 3.45,
            price_change_pct: -1.5,
            availability_pct: 78.0,
            description: "Clean energy generated by wind turbines converting kinetic energy.",
        },
        EnergyTypeProfile {
            source: EnergySource::Hydro,
            current_price: 3.89,
            price_change_pct: -0.8,
            availability_pct: 92.0,
            description: "Renewable energy from flowing water in rivers and reservoirs.",
        },
        EnergyTypeProfile {
            source: EnergySource::Biomass,
            current_price: 4.12,
            price_change_pct: 0.3,
            availability_pct: 65.0,
            description: "Energy from organic materials like plants and agricultural waste.",
        },
        EnergyTypeProfile {
            source: EnergySource::Geothermal,
            current_price: 4.50,
            price_change_pct: -0.5,
            availability_pct: 70.0,
            description: "Heat energy generated and stored beneath the Earth's surface.",
        },
    ]
}

/// User-submitted sell offer; fields stay optional until validated by
/// [`crate::market::TradingDesk::sell_energy`].
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub source: Option<EnergySource>,
    pub quantity_kwh: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub location: Option<String>,
}

/// Validation failures raised by the market containers. None is fatal;
/// every rejected operation leaves container state untouched.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("listing not found: {0}")]
    ListingNotFound(String),
    #[error("not enough energy available: requested {requested} kWh, listed {available} kWh")]
    InsufficientQuantity { requested: f64, available: f64 },
    #[error("insufficient funds in wallet: need {needed:.2}, available {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("missing required listing field: {0}")]
    IncompleteListing(&'static str),
    #[error("smart meter not found: {0}")]
    MeterNotFound(String),
    #[error("a connection request already exists for this meter and DISCOM")]
    DuplicateConnection,
    #[error("order not found: {0}")]
    OrderNotFound(String),
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),
}
