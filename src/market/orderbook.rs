//! Exchange board: the order-book marketplace surface.
//!
//! This model is deliberately disconnected from the trading desk — ids are
//! never shared and neither side reconciles with the other. Its refresh
//! installs a fixed snapshot rather than a random population.

use chrono::{DateTime, Duration, Utc};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use crate::config::MarketScenario;
use crate::synth;
use crate::types::{EnergySource, MarketError};

/// Seed offset for the exchange board RNG to keep containers decorrelated.
const EXCHANGE_SEED_OFFSET: u64 = 37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Bid,
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Filled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradeKind {
    Fixed,
    AutoMatch,
    Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A resting bid or ask on the board.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub side: OrderSide,
    pub source: EnergySource,
    pub amount_kwh: f64,
    pub price_per_kwh: f64,
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
}

/// An executed exchange trade.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub id: String,
    pub seller_id: String,
    pub buyer_id: Option<String>,
    pub source: EnergySource,
    pub amount_kwh: f64,
    pub price_per_kwh: f64,
    pub kind: TradeKind,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate exchange statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MarketStats {
    pub total_volume_kwh: f64,
    pub average_price: f64,
    pub active_trades: u32,
    pub price_change_24h_pct: f64,
}

/// Current quoted price per source.
#[derive(Debug, Clone, Serialize)]
pub struct SpotPrice {
    pub source: EnergySource,
    pub price_per_kwh: f64,
    pub timestamp: DateTime<Utc>,
}

/// Resting orders split by side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderBook {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

/// Fields a caller supplies when placing an order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: String,
    pub side: OrderSide,
    pub source: EnergySource,
    pub amount_kwh: f64,
    pub price_per_kwh: f64,
}

/// In-memory order-book marketplace for one session.
pub struct ExchangeBoard {
    rng: StdRng,
    prices: Vec<SpotPrice>,
    trades: Vec<Trade>,
    stats: MarketStats,
    book: OrderBook,
}

impl ExchangeBoard {
    /// Creates an empty board; call [`ExchangeBoard::refresh`] to install
    /// the snapshot.
    pub fn new(scenario: &MarketScenario) -> Self {
        Self {
            rng: StdRng::seed_from_u64(scenario.session.seed.wrapping_add(EXCHANGE_SEED_OFFSET)),
            prices: Vec::new(),
            trades: Vec::new(),
            stats: MarketStats {
                total_volume_kwh: 0.0,
                average_price: 0.0,
                active_trades: 0,
                price_change_24h_pct: 0.0,
            },
            book: OrderBook::default(),
        }
    }

    /// Replaces prices, stats, order book, and trade history with the
    /// fixed exchange snapshot.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.prices = [
            (EnergySource::Solar, 4.5),
            (EnergySource::Wind, 4.2),
            (EnergySource::Hydro, 3.8),
            (EnergySource::Biomass, 4.0),
        ]
        .iter()
        .map(|&(source, price_per_kwh)| SpotPrice {
            source,
            price_per_kwh,
            timestamp: now,
        })
        .collect();

        self.stats = MarketStats {
            total_volume_kwh: 150_000.0,
            average_price: 4.2,
            active_trades: 45,
            price_change_24h_pct: 2.5,
        };

        let order = |id: &str, user: &str, side, source, amount_kwh, price_per_kwh| Order {
            id: id.to_string(),
            user_id: user.to_string(),
            side,
            source,
            amount_kwh,
            price_per_kwh,
            timestamp: now,
            status: OrderStatus::Active,
        };
        self.book = OrderBook {
            bids: vec![
                order("1", "user1", OrderSide::Bid, EnergySource::Solar, 1000.0, 4.4),
                order("2", "user2", OrderSide::Bid, EnergySource::Wind, 2000.0, 4.3),
            ],
            asks: vec![
                order("3", "user3", OrderSide::Ask, EnergySource::Solar, 1500.0, 4.6),
                order("4", "user4", OrderSide::Ask, EnergySource::Wind, 2500.0, 4.7),
            ],
        };

        let trade = |id: &str, seller: &str, buyer: &str, source, amount_kwh, price_per_kwh, kind, hours_ago: i64| {
            let at = now - Duration::hours(hours_ago);
            Trade {
                id: id.to_string(),
                seller_id: seller.to_string(),
                buyer_id: Some(buyer.to_string()),
                source,
                amount_kwh,
                price_per_kwh,
                kind,
                status: TradeStatus::Completed,
                created_at: at,
                updated_at: at,
            }
        };
        self.trades = vec![
            trade("1", "user3", "user1", EnergySource::Solar, 1000.0, 4.5, TradeKind::Fixed, 1),
            trade("2", "user4", "user2", EnergySource::Wind, 2000.0, 4.2, TradeKind::AutoMatch, 2),
        ];

        info!(
            bids = self.book.bids.len(),
            asks = self.book.asks.len(),
            trades = self.trades.len(),
            "exchange snapshot installed"
        );
    }

    /// Places a new resting order on the board.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and prices; the book is untouched.
    pub fn place_order(
        &mut self,
        draft: OrderDraft,
        now: DateTime<Utc>,
    ) -> Result<Order, MarketError> {
        if draft.amount_kwh <= 0.0 {
            return Err(MarketError::InvalidOrder("amount must be > 0"));
        }
        if draft.price_per_kwh <= 0.0 {
            return Err(MarketError::InvalidOrder("price must be > 0"));
        }

        let order = Order {
            id: synth::base36_id(&mut self.rng),
            user_id: draft.user_id,
            side: draft.side,
            source: draft.source,
            amount_kwh: draft.amount_kwh,
            price_per_kwh: draft.price_per_kwh,
            timestamp: now,
            status: OrderStatus::Active,
        };

        match order.side {
            OrderSide::Bid => self.book.bids.push(order.clone()),
            OrderSide::Ask => self.book.asks.push(order.clone()),
        }

        info!(order = %order.id, side = ?order.side, "order placed");
        Ok(order)
    }

    /// Cancels a resting order by id and returns it marked cancelled.
    ///
    /// # Errors
    ///
    /// Rejects an id not present on either side of the book.
    pub fn cancel_order(&mut self, order_id: &str) -> Result<Order, MarketError> {
        let from_side = |orders: &mut Vec<Order>| {
            orders
                .iter()
                .position(|o| o.id == order_id)
                .map(|idx| orders.remove(idx))
        };

        let mut order = from_side(&mut self.book.bids)
            .or_else(|| from_side(&mut self.book.asks))
            .ok_or_else(|| MarketError::OrderNotFound(order_id.to_string()))?;

        order.status = OrderStatus::Cancelled;
        info!(order = %order.id, "order cancelled");
        Ok(order)
    }

    pub fn prices(&self) -> &[SpotPrice] {
        &self.prices
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn stats(&self) -> &MarketStats {
        &self.stats
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }
}
