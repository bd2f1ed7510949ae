//! Integration tests for the trading desk against a full session.

mod common;

use gridmarket_sim::types::{
    CURRENT_USER, EnergySource, ListingDraft, MarketError, TransactionStatus, round2,
};

#[test]
fn full_refresh_produces_baseline_volumes() {
    let session = common::refreshed_session(42);
    assert_eq!(session.trading.listings().len(), 20);
    assert_eq!(session.trading.transactions().len(), 10);
    assert_eq!(session.trading.predictions().len(), 24);
    assert_eq!(session.trading.wallet().available, 5000.0);
    assert_eq!(session.trading.stats().transactions, 15);
}

#[test]
fn determinism_two_identical_sessions_produce_identical_markets() {
    let a = common::refreshed_session(777);
    let b = common::refreshed_session(777);

    assert_eq!(a.trading.listings().len(), b.trading.listings().len());
    for (x, y) in a.trading.listings().iter().zip(b.trading.listings().iter()) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.quantity_kwh, y.quantity_kwh);
        assert_eq!(x.price_per_kwh, y.price_per_kwh);
        assert_eq!(x.timestamp, y.timestamp);
    }
    for (x, y) in a.trading.predictions().iter().zip(b.trading.predictions().iter()) {
        assert_eq!(x.predicted_price, y.predicted_price);
        assert_eq!(x.recommendation, y.recommendation);
    }
}

#[test]
fn buy_flow_updates_wallet_listing_and_stats_exactly() {
    let mut session = common::refreshed_session(42);
    let listing = session.trading.listings()[3].clone();
    let wallet_before = session.trading.wallet().available;
    let bought_before = session.trading.stats().energy_bought_kwh;
    let quantity = 42.0;

    let tx = session
        .trading
        .buy_energy(&listing.id, quantity, common::fixed_now())
        .expect("buy should succeed");

    let total = listing.price_per_kwh * quantity;
    assert_eq!(tx.total_price, round2(total));
    assert_eq!(tx.status, TransactionStatus::Completed);
    assert_eq!(tx.seller_id, listing.seller_id);
    assert_eq!(
        session.trading.wallet().available,
        round2(wallet_before - total)
    );
    assert_eq!(
        session.trading.stats().energy_bought_kwh,
        bought_before + quantity
    );

    let updated = session
        .trading
        .listings()
        .iter()
        .find(|l| l.id == listing.id)
        .expect("partially bought listing remains");
    assert_eq!(updated.quantity_kwh, listing.quantity_kwh - quantity);
}

#[test]
fn rejected_buys_leave_the_whole_desk_unchanged() {
    let mut session = common::refreshed_session(42);
    let listing = session.trading.listings()[0].clone();
    let wallet_before = session.trading.wallet().available;
    let listings_before = session.trading.listings().len();
    let tx_before = session.trading.transactions().len();
    let stats_before = session.trading.stats().clone();

    // Over-quantity rejection.
    let err = session
        .trading
        .buy_energy(&listing.id, listing.quantity_kwh * 2.0, common::fixed_now());
    assert!(matches!(err, Err(MarketError::InsufficientQuantity { .. })));

    // Unknown-listing rejection.
    let err = session
        .trading
        .buy_energy("missing", 1.0, common::fixed_now());
    assert!(matches!(err, Err(MarketError::ListingNotFound(_))));

    assert_eq!(session.trading.wallet().available, wallet_before);
    assert_eq!(session.trading.listings().len(), listings_before);
    assert_eq!(session.trading.transactions().len(), tx_before);
    assert_eq!(
        session.trading.stats().transactions,
        stats_before.transactions
    );
    assert_eq!(
        session.trading.stats().savings_to_date,
        stats_before.savings_to_date
    );
}

#[test]
fn buy_then_sell_round_trip() {
    let mut session = common::refreshed_session(42);
    let listing = session.trading.listings()[0].clone();

    session
        .trading
        .buy_energy(&listing.id, 10.0, common::fixed_now())
        .expect("buy");

    let relisted = session
        .trading
        .sell_energy(
            ListingDraft {
                source: Some(listing.source),
                quantity_kwh: Some(10.0),
                price_per_kwh: Some(listing.price_per_kwh + 0.2),
                location: None,
            },
            common::fixed_now(),
        )
        .expect("sell");

    assert_eq!(session.trading.listings()[0].id, relisted.id);
    assert_eq!(session.trading.listings()[0].seller_id, CURRENT_USER);
    // Selling credits no money; only the purchase debit applies.
    let expected_wallet = round2(5000.0 - listing.price_per_kwh * 10.0);
    assert_eq!(session.trading.wallet().available, expected_wallet);
}

#[test]
fn drained_listing_disappears_from_the_book() {
    let mut session = common::refreshed_session(42);

    // A cheap listing the wallet can fully afford.
    let listing = session
        .trading
        .listings()
        .iter()
        .min_by(|a, b| {
            let ca = a.price_per_kwh * a.quantity_kwh;
            let cb = b.price_per_kwh * b.quantity_kwh;
            ca.partial_cmp(&cb).unwrap()
        })
        .expect("non-empty book")
        .clone();
    let affordable = session.trading.wallet().available >= listing.price_per_kwh * listing.quantity_kwh;
    if !affordable {
        // Baseline wallet cannot drain any listing; the partial path is
        // covered elsewhere.
        return;
    }

    session
        .trading
        .buy_energy(&listing.id, listing.quantity_kwh, common::fixed_now())
        .expect("draining buy");
    assert!(session.trading.listings().iter().all(|l| l.id != listing.id));
}

#[test]
fn savings_accumulate_at_ten_percent_of_spend() {
    let mut session = common::refreshed_session(42);
    let listing = session.trading.listings()[0].clone();
    let savings_before = session.trading.stats().savings_to_date;

    session
        .trading
        .buy_energy(&listing.id, 20.0, common::fixed_now())
        .expect("buy");

    let total = listing.price_per_kwh * 20.0;
    assert_eq!(
        session.trading.stats().savings_to_date,
        round2(savings_before + total * 0.1)
    );
}

#[test]
fn sell_validation_reports_the_missing_field() {
    let mut session = common::refreshed_session(42);

    let missing_source = session.trading.sell_energy(
        ListingDraft {
            source: None,
            quantity_kwh: Some(10.0),
            price_per_kwh: Some(3.0),
            location: None,
        },
        common::fixed_now(),
    );
    assert!(matches!(
        missing_source,
        Err(MarketError::IncompleteListing("source"))
    ));

    let missing_price = session.trading.sell_energy(
        ListingDraft {
            source: Some(EnergySource::Wind),
            quantity_kwh: Some(10.0),
            price_per_kwh: None,
            location: None,
        },
        common::fixed_now(),
    );
    assert!(matches!(
        missing_price,
        Err(MarketError::IncompleteListing("price"))
    ));
}

#[test]
fn price_history_and_user_charts_come_with_the_refresh() {
    let session = common::refreshed_session(42);
    let history = session.trading.price_history();
    assert_eq!(history.len(), 3);
    for series in history {
        assert_eq!(series.points.len(), 31);
    }
    let charts = session.trading.user_charts().expect("charts populated");
    assert_eq!(charts.daily_consumption.points.len(), 30);
    assert_eq!(charts.source_breakdown.len(), 5);
}
