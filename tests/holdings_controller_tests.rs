mod common;

use axum::{
    http::{header, Request, StatusCode},
    routing::get,
    Json, Router,
};
use common::{response_body_string, test_state, FakePrices};
use portfolio_tracker::routes;
use rust_decimal_macros::dec;
use serde_json::json;
use tower::ServiceExt;

const NO_RATE_SERVICE: &str = "http://127.0.0.1:9/v4/latest/USD";

fn form_request(body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri("/holdings")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn post_holding_zero_lots_renders_error() {
    let prices = FakePrices::with_book(json!({}));
    let state = test_state(prices.clone(), NO_RATE_SERVICE);
    let app = routes::app(state);

    let res = app
        .oneshot(form_request("ticker=BBCA&lots=0&exchange=JK&exchange_rate="))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("HX-Trigger").is_none());

    let body = response_body_string(res).await;
    assert!(body.contains("Lot amount must be greater than 0"));
    // fields are kept for correction
    assert!(body.contains(r#"value="BBCA""#));
    assert_eq!(prices.calls(), 0);
}

#[tokio::test]
async fn post_holding_missing_ticker_renders_error() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let app = routes::app(state);

    let res = app
        .oneshot(form_request("ticker=&lots=1&exchange=JK"))
        .await
        .unwrap();

    let body = response_body_string(res).await;
    assert!(body.contains("Stock code and lot amount must be filled"));
}

#[tokio::test]
async fn post_holding_adds_to_portfolio_and_resets_form() {
    let prices = FakePrices::with_book(json!({
        "BBCA.JK": { "price": 9000, "currency": "IDR" }
    }));
    let state = test_state(prices.clone(), NO_RATE_SERVICE);
    let holdings = state.holdings.clone();
    let app = routes::app(state);

    let res = app
        .clone()
        .oneshot(form_request("ticker=bbca&lots=2&exchange=JK&exchange_rate=15000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Trigger").unwrap(), "holdingsUpdated");

    let body = response_body_string(res).await;
    assert!(body.contains("Stock successfully added"));
    assert!(body.contains(r#"name="ticker" value="""#));
    assert!(body.contains(r#"name="lots" value="1""#));
    assert!(body.contains(r#"<option value="JK" selected>"#));

    let stored = holdings.list().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].value_usd, dec!(120));
    assert_eq!(prices.last_request().unwrap().exchange_rate, Some(dec!(15000)));

    let res = app.oneshot(get_request("/holdings")).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("BBCA"));
    assert!(body.contains("1800000.00"));
    assert!(body.contains("120.00"));
}

#[tokio::test]
async fn post_holding_unknown_ticker_renders_not_found() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let holdings = state.holdings.clone();
    let app = routes::app(state);

    let res = app
        .oneshot(form_request("ticker=zzzz&lots=1&exchange="))
        .await
        .unwrap();

    let body = response_body_string(res).await;
    assert!(body.contains("Stock price data not found"));
    assert_eq!(holdings.len().await, 0);
}

#[tokio::test]
async fn get_holdings_empty_renders_placeholder() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let app = routes::app(state);

    let res = app.oneshot(get_request("/holdings")).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("No holdings yet."));
}

#[tokio::test]
async fn quick_pick_prefills_form() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let app = routes::app(state);

    let res = app.oneshot(get_request("/holdings/form?pick=nvda")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains(r#"name="ticker" value="NVDA""#));
    assert!(body.contains(r#"<option value="US" selected>"#));
}

#[tokio::test]
async fn exchange_rate_panel_renders_rate_field() {
    let app = Router::new().route(
        "/v4/latest/USD",
        get(|| async { Json(json!({ "rates": { "IDR": 15500 } })) }),
    );
    let base = common::spawn_server(app).await;
    let state = test_state(FakePrices::with_book(json!({})), &format!("{base}/v4/latest/USD"));
    let app = routes::app(state);

    let res = app.oneshot(get_request("/exchange-rate")).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("1 USD = 15500.00 IDR"));
    assert!(body.contains(r#"name="exchange_rate" form="stock-form" value="15500""#));
}

#[tokio::test]
async fn exchange_rate_panel_renders_propagated_error() {
    let app = Router::new().route(
        "/v4/latest/USD",
        get(|| async { Json(json!({ "rates": { "IDR": 25000 } })) }),
    );
    let base = common::spawn_server(app).await;
    let state = test_state(FakePrices::with_book(json!({})), &format!("{base}/v4/latest/USD"));
    let app = routes::app(state);

    let res = app.oneshot(get_request("/exchange-rate")).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("Exchange rate out of expected range"));
    assert!(!body.contains(r#"name="exchange_rate""#));
}

#[tokio::test]
async fn home_renders_form_and_unknown_path_is_404() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let app = routes::app(state);

    let res = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_body_string(res).await;
    assert!(body.contains(r#"id="stock-form""#));
    assert!(body.contains("BBCA (JK)"));

    let res = app.oneshot(get_request("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn htmx_requests_get_page_body_without_layout() {
    let state = test_state(FakePrices::with_book(json!({})), NO_RATE_SERVICE);
    let app = routes::app(state);

    let htmx_get = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header("HX-Request", "true")
            .body(axum::body::Body::empty())
            .unwrap()
    };

    let res = app.clone().oneshot(htmx_get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_body_string(res).await;
    assert!(body.contains(r#"id="stock-form""#));
    assert!(!body.contains("<!doctype html>"));

    let res = app.clone().oneshot(htmx_get("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = response_body_string(res).await;
    assert!(body.contains("Page not found"));
    assert!(!body.contains("<!doctype html>"));

    let res = app.oneshot(get_request("/nope")).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("<!doctype html>"));
}

#[tokio::test]
async fn post_holding_oversized_position_renders_error() {
    let prices = FakePrices::with_book(json!({
        "AAPL.US": { "price": 150, "currency": "USD" }
    }));
    let state = test_state(prices, NO_RATE_SERVICE);
    let holdings = state.holdings.clone();
    let app = routes::app(state);

    let res = app
        .oneshot(form_request("ticker=aapl&lots=1e24&exchange=US&exchange_rate=15500"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("HX-Trigger").is_none());
    let body = response_body_string(res).await;
    assert!(body.contains("Holding value is out of range"));
    assert_eq!(holdings.len().await, 0);
}
