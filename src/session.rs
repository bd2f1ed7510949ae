//! Bundles the market containers behind one construction and refresh
//! entry point.

use chrono::{DateTime, Utc};

use crate::config::MarketScenario;
use crate::market::{ExchangeBoard, MeterNetwork, TradingDesk};

/// All session-owned market state: the trading desk, the meter network,
/// and the exchange board. Each container is independently seeded from
/// the scenario so the whole session reproduces from one seed.
pub struct MarketSession {
    pub trading: TradingDesk,
    pub meters: MeterNetwork,
    pub exchange: ExchangeBoard,
}

impl MarketSession {
    /// Builds empty containers from the scenario; nothing is populated
    /// until [`MarketSession::refresh_all`].
    pub fn new(scenario: &MarketScenario) -> Self {
        Self {
            trading: TradingDesk::new(scenario),
            meters: MeterNetwork::new(scenario),
            exchange: ExchangeBoard::new(scenario),
        }
    }

    /// Populates every container, discarding any prior state.
    pub fn refresh_all(&mut self, now: DateTime<Utc>) {
        self.trading.refresh_market_data(now);
        self.meters.refresh(now);
        self.exchange.refresh(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn refresh_all_populates_every_container() {
        let scenario = MarketScenario::baseline();
        let mut session = MarketSession::new(&scenario);
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        session.refresh_all(now);

        assert!(!session.trading.listings().is_empty());
        assert!(!session.meters.meters().is_empty());
        assert!(!session.exchange.prices().is_empty());
    }
}
