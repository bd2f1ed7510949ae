//! End-to-end checks for the REST API over a refreshed session snapshot.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gridmarket_sim::api::{AppState, router};
use tower::util::ServiceExt;

fn make_state() -> Arc<AppState> {
    let session = common::refreshed_session(42);
    Arc::new(AppState::from_session(&session))
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(make_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn market_snapshot_matches_session_volumes() {
    let (status, json) = get_json("/market").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["listings"].as_array().map(Vec::len), Some(20));
    assert_eq!(json["transactions"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["wallet"]["available"], 5000.0);
    assert_eq!(json["wallet"]["currency"], "USD");
}

#[tokio::test]
async fn predictions_serialize_recommendations_lowercase() {
    let (status, json) = get_json("/predictions").await;
    assert_eq!(status, StatusCode::OK);
    let preds = json.as_array().expect("array body");
    assert_eq!(preds.len(), 24);
    for p in preds {
        let rec = p["recommendation"].as_str().expect("string enum");
        assert!(matches!(rec, "buy" | "sell" | "hold"));
    }
}

#[tokio::test]
async fn readings_default_returns_full_window() {
    let (status, json) = get_json("/readings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(7 * 24));
}

#[tokio::test]
async fn readings_limit_truncates_newest_first() {
    let (status, json) = get_json("/readings?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().expect("array body");
    assert_eq!(rows.len(), 5);

    let (_, full) = get_json("/readings").await;
    assert_eq!(rows[0]["id"], full[0]["id"]);
}

#[tokio::test]
async fn readings_zero_limit_is_a_client_error() {
    let (status, json) = get_json("/readings?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn settlements_carry_the_sign_convention() {
    let (status, json) = get_json("/settlements").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().expect("array body");
    assert_eq!(rows.len(), 6);
    for row in rows {
        let net = row["net_energy_kwh"].as_f64().expect("net energy");
        let amount = row["net_amount"].as_f64().expect("net amount");
        if net < 0.0 {
            assert!(amount < 0.0, "net export must credit the user");
        }
    }
}

#[tokio::test]
async fn orderbook_exposes_the_fixed_snapshot() {
    let (status, json) = get_json("/orderbook").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bids"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["asks"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["stats"]["active_trades"], 45);
}
