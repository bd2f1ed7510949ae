//! Synthetic domain generators for marketplace, meter, and billing data.
//!
//! Every generator is a pure function over an injected `StdRng` and an
//! explicit `now`, so identical seeds and clocks reproduce identical data.
//! Generators never read prior state; repeated calls produce unrelated
//! populations.

/// DISCOM, grid-connection, and settlement generators.
pub mod grid;
/// Listing, transaction, and price-prediction generators.
pub mod market;
/// Smart-meter fleet and reading generators.
pub mod meters;
pub mod types;

// Re-export the shared helpers for convenience
pub use types::base36_id;
pub use types::future_date;
pub use types::recent_date;
pub use types::weighted_source;
