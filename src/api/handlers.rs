//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, MarketResponse, OrderBookResponse, ReadingsQuery};
use crate::types::{EnergyPrediction, EnergySettlement, SmartMeterReading};

/// Returns wallet, stats, listings, and recent transactions.
///
/// `GET /market` → 200 + `MarketResponse` JSON
pub async fn get_market(State(state): State<Arc<AppState>>) -> Json<MarketResponse> {
    Json(MarketResponse {
        wallet: state.wallet.clone(),
        stats: state.stats.clone(),
        listings: state.listings.clone(),
        transactions: state.transactions.clone(),
    })
}

/// Returns the hourly price forecast.
///
/// `GET /predictions` → 200 + `Vec<EnergyPrediction>` JSON
pub async fn get_predictions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<EnergyPrediction>> {
    Json(state.predictions.clone())
}

/// Returns meter readings, optionally truncated to the newest `limit` rows.
///
/// `GET /readings` → 200 + `Vec<SmartMeterReading>` JSON
/// `GET /readings?limit=N` → newest N rows
/// `GET /readings?limit=0` → 400 + `ErrorResponse`
pub async fn get_readings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadingsQuery>,
) -> impl IntoResponse {
    if query.limit == Some(0) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "`limit` must be > 0".to_string(),
            }),
        ));
    }

    let limit = query.limit.unwrap_or(usize::MAX);
    let records: Vec<SmartMeterReading> =
        state.readings.iter().take(limit).cloned().collect();

    Ok(Json(records))
}

/// Returns the settlement history for the selected meter.
///
/// `GET /settlements` → 200 + `Vec<EnergySettlement>` JSON
pub async fn get_settlements(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<EnergySettlement>> {
    Json(state.settlements.clone())
}

/// Returns the exchange order book and aggregate stats.
///
/// `GET /orderbook` → 200 + `OrderBookResponse` JSON
pub async fn get_orderbook(State(state): State<Arc<AppState>>) -> Json<OrderBookResponse> {
    Json(OrderBookResponse {
        bids: state.book.bids.clone(),
        asks: state.book.asks.clone(),
        stats: state.exchange_stats.clone(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::MarketScenario;
    use crate::session::MarketSession;

    fn make_test_state() -> Arc<AppState> {
        let scenario = MarketScenario::baseline();
        let mut session = MarketSession::new(&scenario);
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        session.refresh_all(now);
        Arc::new(AppState::from_session(&session))
    }

    #[tokio::test]
    async fn market_returns_200_with_expected_shape() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/market")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("wallet").is_some());
        assert!(json.get("stats").is_some());
        assert_eq!(json["listings"].as_array().map(Vec::len), Some(20));
        assert_eq!(json["transactions"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn predictions_returns_full_horizon() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/predictions")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 24);
        assert!(json[0].get("predicted_price").is_some());
        assert!(json[0].get("recommendation").is_some());
    }

    #[tokio::test]
    async fn readings_limit_query() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/readings?limit=10")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 10);
    }

    #[tokio::test]
    async fn readings_zero_limit_returns_400() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/readings?limit=0")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn orderbook_returns_both_sides() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/orderbook")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["bids"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["asks"].as_array().map(Vec::len), Some(2));
        assert!(json["stats"].get("average_price").is_some());
    }
}
