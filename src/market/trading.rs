//! Trading desk: listings, wallet, user stats, and the buy/sell contracts.

use chrono::{DateTime, Utc};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::charts::{self, ChartSeries, UserChartData};
use crate::config::MarketScenario;
use crate::synth;
use crate::types::{
    CURRENT_USER, EnergyListing, EnergyPrediction, ListingDraft, MarketError,
    Transaction, TransactionStatus, UserStats, WalletBalance, round2,
};

/// Seed offset for the trading desk RNG to keep containers decorrelated.
const TRADING_SEED_OFFSET: u64 = 11;

/// Share of each purchase counted toward the buyer's savings.
const SAVINGS_RATE: f64 = 0.1;

/// In-memory trading state for one session.
///
/// Every mutation either completes fully or returns an error leaving all
/// held state untouched. A refresh discards the market wholesale and
/// fabricates a new population; nothing survives except wallet and stats.
pub struct TradingDesk {
    rng: StdRng,
    listing_count: usize,
    transaction_count: usize,
    prediction_hours: usize,
    history_days: usize,
    listings: Vec<EnergyListing>,
    transactions: Vec<Transaction>,
    wallet: WalletBalance,
    stats: UserStats,
    predictions: Vec<EnergyPrediction>,
    price_history: Vec<ChartSeries>,
    user_charts: Option<UserChartData>,
}

impl TradingDesk {
    /// Creates an empty desk; call [`TradingDesk::refresh_market_data`] to
    /// populate it.
    pub fn new(scenario: &MarketScenario) -> Self {
        Self {
            rng: StdRng::seed_from_u64(scenario.session.seed.wrapping_add(TRADING_SEED_OFFSET)),
            listing_count: scenario.market.listing_count,
            transaction_count: scenario.market.transaction_count,
            prediction_hours: scenario.market.prediction_hours,
            history_days: scenario.market.history_days,
            listings: Vec::new(),
            transactions: Vec::new(),
            wallet: WalletBalance {
                available: scenario.wallet.available,
                pending: scenario.wallet.pending,
                currency: scenario.wallet.currency.clone(),
            },
            stats: UserStats {
                energy_bought_kwh: scenario.stats.energy_bought_kwh,
                energy_sold_kwh: scenario.stats.energy_sold_kwh,
                co2_offset_kg: scenario.stats.co2_offset_kg,
                savings_to_date: scenario.stats.savings_to_date,
                transactions: scenario.stats.transactions,
            },
            predictions: Vec::new(),
            price_history: Vec::new(),
            user_charts: None,
        }
    }

    /// Regenerates listings, transactions, predictions, and chart
    /// aggregates wholesale, discarding prior market state. Wallet and
    /// stats carry over.
    pub fn refresh_market_data(&mut self, now: DateTime<Utc>) {
        self.listings = synth::market::listings(&mut self.rng, now, self.listing_count);
        self.transactions = synth::market::transactions(&mut self.rng, now, self.transaction_count);
        self.predictions = synth::market::predictions(&mut self.rng, now, self.prediction_hours);
        self.price_history = charts::historical_price_series(&mut self.rng, now, self.history_days);
        self.user_charts = Some(charts::user_chart_data(&mut self.rng, now));
        info!(
            listings = self.listings.len(),
            transactions = self.transactions.len(),
            predictions = self.predictions.len(),
            "market data refreshed"
        );
    }

    /// Buys `quantity_kwh` from the given listing.
    ///
    /// Debits the wallet, decrements the listing (removing it once
    /// drained), prepends a completed transaction, and bumps the buyer
    /// stats. The listing's CO2 factor is attributed pro-rata.
    ///
    /// # Errors
    ///
    /// Rejects an unknown listing, a quantity above what is listed, or a
    /// total above the available balance. No state changes on rejection.
    pub fn buy_energy(
        &mut self,
        listing_id: &str,
        quantity_kwh: f64,
        now: DateTime<Utc>,
    ) -> Result<Transaction, MarketError> {
        let idx = self
            .listings
            .iter()
            .position(|l| l.id == listing_id)
            .ok_or_else(|| MarketError::ListingNotFound(listing_id.to_string()))?;

        let listing = &self.listings[idx];
        if listing.quantity_kwh < quantity_kwh {
            return Err(MarketError::InsufficientQuantity {
                requested: quantity_kwh,
                available: listing.quantity_kwh,
            });
        }

        let total_cost = listing.price_per_kwh * quantity_kwh;
        if self.wallet.available < total_cost {
            return Err(MarketError::InsufficientFunds {
                needed: total_cost,
                available: self.wallet.available,
            });
        }

        // CO2 is attributed per-kWh from the listing as it stood pre-trade.
        let co2_per_kwh = listing.co2_offset_kg / listing.quantity_kwh;
        let source = listing.source;

        self.wallet.available = round2(self.wallet.available - total_cost);

        let transaction = Transaction {
            id: synth::base36_id(&mut self.rng),
            buyer_id: CURRENT_USER.to_string(),
            seller_id: listing.seller_id.clone(),
            listing_id: listing.id.clone(),
            quantity_kwh,
            unit_price: listing.price_per_kwh,
            total_price: round2(total_cost),
            timestamp: now,
            status: TransactionStatus::Completed,
        };

        let listing = &mut self.listings[idx];
        listing.quantity_kwh -= quantity_kwh;
        if listing.quantity_kwh <= 0.0 {
            self.listings.remove(idx);
        }

        self.transactions.insert(0, transaction.clone());

        self.stats.energy_bought_kwh += quantity_kwh;
        self.stats.co2_offset_kg += co2_per_kwh * quantity_kwh;
        self.stats.savings_to_date =
            round2(self.stats.savings_to_date + total_cost * SAVINGS_RATE);
        self.stats.transactions += 1;

        info!(
            listing = %transaction.listing_id,
            quantity_kwh,
            total = transaction.total_price,
            %source,
            "purchase completed"
        );

        Ok(transaction)
    }

    /// Lists energy for sale on behalf of the session user.
    ///
    /// The new listing lands at the head of the active set. The seller's
    /// sold counter increases, but no wallet credit occurs in the current
    /// market model.
    ///
    /// # Errors
    ///
    /// Rejects a draft missing source, quantity, or price.
    pub fn sell_energy(
        &mut self,
        draft: ListingDraft,
        now: DateTime<Utc>,
    ) -> Result<EnergyListing, MarketError> {
        let source = draft
            .source
            .ok_or(MarketError::IncompleteListing("source"))?;
        let quantity_kwh = draft
            .quantity_kwh
            .ok_or(MarketError::IncompleteListing("quantity"))?;
        let price_per_kwh = draft
            .price_per_kwh
            .ok_or(MarketError::IncompleteListing("price"))?;

        let listing = EnergyListing {
            id: synth::base36_id(&mut self.rng),
            seller_id: CURRENT_USER.to_string(),
            seller_name: "You".to_string(),
            source,
            quantity_kwh,
            price_per_kwh,
            location: draft.location.unwrap_or_else(|| "Your Location".to_string()),
            timestamp: now,
            co2_offset_kg: quantity_kwh * 0.5,
        };

        self.listings.insert(0, listing.clone());
        self.stats.energy_sold_kwh += quantity_kwh;

        info!(
            listing = %listing.id,
            quantity_kwh,
            price_per_kwh,
            %source,
            "listing created"
        );

        Ok(listing)
    }

    pub fn listings(&self) -> &[EnergyListing] {
        &self.listings
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn wallet(&self) -> &WalletBalance {
        &self.wallet
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn predictions(&self) -> &[EnergyPrediction] {
        &self.predictions
    }

    pub fn price_history(&self) -> &[ChartSeries] {
        &self.price_history
    }

    pub fn user_charts(&self) -> Option<&UserChartData> {
        self.user_charts.as_ref()
    }
}
