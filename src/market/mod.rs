//! In-memory market state containers and their mutation contracts.
//!
//! Three independent stores own all session state: the trading desk
//! (listings, wallet, stats), the meter network (meters, connections,
//! settlements), and the exchange board (the separate order-book surface).
//! Entities are never shared across containers; ids are matched by value
//! where two stores refer to the same thing informally.

/// Smart-meter and grid-connection container.
pub mod meters;
/// Order-book marketplace container (disconnected from the trading desk).
pub mod orderbook;
/// Listing/wallet trading container.
pub mod trading;

pub use meters::MeterNetwork;
pub use orderbook::ExchangeBoard;
pub use trading::TradingDesk;
