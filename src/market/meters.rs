//! Meter network: smart meters, DISCOM records, grid connections, and
//! settlement history for the selected meter.

use chrono::{DateTime, Utc};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::config::MarketScenario;
use crate::synth;
use crate::types::{
    ApprovalStatus, DiscomInfo, EnergySettlement, GridConnection, MarketError,
    SmartMeter, SmartMeterReading,
};

/// Seed offset for the meter network RNG to keep containers decorrelated.
const METERS_SEED_OFFSET: u64 = 23;

/// In-memory smart-meter and grid-connection state for one session.
///
/// Readings and settlements always describe the currently selected meter;
/// selecting another meter refetches both.
pub struct MeterNetwork {
    rng: StdRng,
    meter_count: usize,
    reading_days: usize,
    settlement_months: usize,
    meters: Vec<SmartMeter>,
    selected_meter_id: Option<String>,
    readings: Vec<SmartMeterReading>,
    discoms: Vec<DiscomInfo>,
    connections: Vec<GridConnection>,
    settlements: Vec<EnergySettlement>,
}

impl MeterNetwork {
    /// Creates an empty network; call [`MeterNetwork::refresh`] to populate.
    pub fn new(scenario: &MarketScenario) -> Self {
        Self {
            rng: StdRng::seed_from_u64(scenario.session.seed.wrapping_add(METERS_SEED_OFFSET)),
            meter_count: scenario.meters.meter_count,
            reading_days: scenario.meters.reading_days,
            settlement_months: scenario.meters.settlement_months,
            meters: Vec::new(),
            selected_meter_id: None,
            readings: Vec::new(),
            discoms: Vec::new(),
            connections: Vec::new(),
            settlements: Vec::new(),
        }
    }

    /// Regenerates the whole fleet: meters, DISCOM records, one seed
    /// connection for the first meter, and its settlement history. The
    /// first meter becomes the selection.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.meters = synth::meters::smart_meters(&mut self.rng, now, self.meter_count);
        self.discoms = synth::grid::discoms(&mut self.rng);
        self.selected_meter_id = None;
        self.readings.clear();
        self.connections.clear();
        self.settlements.clear();

        if let Some(first_meter_id) = self.meters.first().map(|m| m.id.clone()) {
            self.selected_meter_id = Some(first_meter_id.clone());
            self.fetch_readings(&first_meter_id, self.reading_days, now);

            if let Some(discom_id) = self.discoms.first().map(|d| d.id.clone()) {
                let connection =
                    synth::grid::grid_connection(&mut self.rng, now, &first_meter_id, &discom_id);
                self.settlements = synth::grid::settlements(
                    &mut self.rng,
                    now,
                    &connection.id,
                    self.settlement_months,
                );
                self.connections.push(connection);
            }
        }

        info!(
            meters = self.meters.len(),
            discoms = self.discoms.len(),
            connections = self.connections.len(),
            "smart-meter data refreshed"
        );
    }

    /// Makes `meter_id` the active meter, refetching its reading window
    /// and recomputing settlements for any connection tied to it (or
    /// clearing them if none exists).
    ///
    /// # Errors
    ///
    /// Rejects an id not present in the current fleet; state is untouched.
    pub fn select_meter(&mut self, meter_id: &str, now: DateTime<Utc>) -> Result<(), MarketError> {
        if !self.meters.iter().any(|m| m.id == meter_id) {
            return Err(MarketError::MeterNotFound(meter_id.to_string()));
        }

        self.selected_meter_id = Some(meter_id.to_string());
        self.fetch_readings(meter_id, self.reading_days, now);

        match self
            .connections
            .iter()
            .find(|c| c.meter_id == meter_id)
            .map(|c| c.id.clone())
        {
            Some(connection_id) => {
                self.settlements = synth::grid::settlements(
                    &mut self.rng,
                    now,
                    &connection_id,
                    self.settlement_months,
                );
            }
            None => self.settlements.clear(),
        }

        Ok(())
    }

    /// Regenerates the reading window for `meter_id` and patches the
    /// selected meter's last reading to the newest entry.
    pub fn fetch_readings(&mut self, meter_id: &str, days: usize, now: DateTime<Utc>) {
        self.readings = synth::meters::meter_readings(&mut self.rng, now, meter_id, days);

        if let Some(selected_id) = self.selected_meter_id.clone() {
            let newest = self.readings.first().cloned();
            if let Some(meter) = self.meters.iter_mut().find(|m| m.id == selected_id) {
                meter.last_reading = newest;
            }
        }
    }

    /// Submits an interconnection application for a (meter, DISCOM) pair.
    ///
    /// The fabricated connection is forced to pending regardless of the
    /// generator's draw; approval and contract dates are cleared so the
    /// record stays consistent with its status.
    ///
    /// # Errors
    ///
    /// Rejects a duplicate application for the same pair, leaving the
    /// connection set unchanged.
    pub fn apply_for_grid_connection(
        &mut self,
        meter_id: &str,
        discom_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GridConnection, MarketError> {
        let duplicate = self
            .connections
            .iter()
            .any(|c| c.meter_id == meter_id && c.discom_id == discom_id);
        if duplicate {
            return Err(MarketError::DuplicateConnection);
        }

        let mut connection = synth::grid::grid_connection(&mut self.rng, now, meter_id, discom_id);
        connection.approval_status = ApprovalStatus::Pending;
        connection.approval_date = None;
        connection.contract_end_date = None;

        self.connections.push(connection.clone());

        info!(
            meter = meter_id,
            discom = discom_id,
            connection = %connection.id,
            "grid connection application submitted"
        );

        Ok(connection)
    }

    pub fn meters(&self) -> &[SmartMeter] {
        &self.meters
    }

    pub fn selected_meter(&self) -> Option<&SmartMeter> {
        let id = self.selected_meter_id.as_deref()?;
        self.meters.iter().find(|m| m.id == id)
    }

    pub fn readings(&self) -> &[SmartMeterReading] {
        &self.readings
    }

    pub fn discoms(&self) -> &[DiscomInfo] {
        &self.discoms
    }

    pub fn connections(&self) -> &[GridConnection] {
        &self.connections
    }

    pub fn settlements(&self) -> &[EnergySettlement] {
        &self.settlements
    }
}
