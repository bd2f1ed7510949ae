//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::market::orderbook::{MarketStats, Order};
use crate::types::{EnergyListing, Transaction, UserStats, WalletBalance};

/// Combined market response: wallet, stats, listings, and transactions.
#[derive(Debug, Serialize)]
pub struct MarketResponse {
    /// Session wallet balance.
    pub wallet: WalletBalance,
    /// Session trading counters.
    pub stats: UserStats,
    /// Active listings.
    pub listings: Vec<EnergyListing>,
    /// Recent transactions, newest first.
    pub transactions: Vec<Transaction>,
}

/// Exchange board response: both book sides plus aggregate stats.
#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    /// Resting bids.
    pub bids: Vec<Order>,
    /// Resting asks.
    pub asks: Vec<Order>,
    /// Aggregate exchange statistics.
    pub stats: MarketStats,
}

/// Optional paging parameters for the readings endpoint.
#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    /// Maximum rows to return, newest first (must be > 0 when given).
    pub limit: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
