//! REST API over a completed market session snapshot.
//!
//! Provides read-only GET endpoints:
//! - `/market` — wallet, stats, listings, and recent transactions
//! - `/predictions` — the hourly price forecast
//! - `/readings` — meter readings with optional `limit` query
//! - `/settlements` — settlement history for the selected meter
//! - `/orderbook` — the exchange board's resting orders and stats

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::market::orderbook::{MarketStats, OrderBook};
use crate::session::MarketSession;
use crate::types::{
    EnergyListing, EnergyPrediction, EnergySettlement, SmartMeter, SmartMeterReading,
    Transaction, UserStats, WalletBalance,
};

/// Immutable application state shared across all request handlers.
///
/// Snapshotted once from a refreshed session and wrapped in `Arc` — no
/// locks needed since all data is read-only.
pub struct AppState {
    pub wallet: WalletBalance,
    pub stats: UserStats,
    pub listings: Vec<EnergyListing>,
    pub transactions: Vec<Transaction>,
    pub predictions: Vec<EnergyPrediction>,
    pub meters: Vec<SmartMeter>,
    pub readings: Vec<SmartMeterReading>,
    pub settlements: Vec<EnergySettlement>,
    pub book: OrderBook,
    pub exchange_stats: MarketStats,
}

impl AppState {
    /// Snapshots a session into servable state.
    pub fn from_session(session: &MarketSession) -> Self {
        Self {
            wallet: session.trading.wallet().clone(),
            stats: session.trading.stats().clone(),
            listings: session.trading.listings().to_vec(),
            transactions: session.trading.transactions().to_vec(),
            predictions: session.trading.predictions().to_vec(),
            meters: session.meters.meters().to_vec(),
            readings: session.meters.readings().to_vec(),
            settlements: session.meters.settlements().to_vec(),
            book: session.exchange.book().clone(),
            exchange_stats: session.exchange.stats().clone(),
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/market", get(handlers::get_market))
        .route("/predictions", get(handlers::get_predictions))
        .route("/readings", get(handlers::get_readings))
        .route("/settlements", get(handlers::get_settlements))
        .route("/orderbook", get(handlers::get_orderbook))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
