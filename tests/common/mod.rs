//! Shared builders for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use gridmarket_sim::config::MarketScenario;
use gridmarket_sim::session::MarketSession;

/// Fixed clock so every integration run sees the same calendar.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Baseline scenario with a pinned seed.
pub fn scenario_with_seed(seed: u64) -> MarketScenario {
    let mut scenario = MarketScenario::baseline();
    scenario.session.seed = seed;
    scenario
}

/// A fully refreshed session at the fixed clock.
pub fn refreshed_session(seed: u64) -> MarketSession {
    let scenario = scenario_with_seed(seed);
    let mut session = MarketSession::new(&scenario);
    session.refresh_all(fixed_now());
    session
}
