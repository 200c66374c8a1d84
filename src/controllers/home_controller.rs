use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{
    controllers::holdings_controller::form_ctx,
    models::StockForm,
    render,
    services::stock_input::StatusSnapshot,
    AppState,
};

// GET / — empty stock form, rate panel and holdings list
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = form_ctx(&StockForm::default(), &StatusSnapshot::default());
    render::render_page(
        &state,
        &headers,
        StatusCode::OK,
        "Portfolio Tracker",
        "pages/home",
        &ctx,
    )
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render::render_page(
        &state,
        &headers,
        StatusCode::NOT_FOUND,
        "404",
        "pages/not_found",
        &json!({}),
    )
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}
