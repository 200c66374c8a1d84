use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

// GET /exchange-rate (HTMX partial)
//
// Renders the fetched rate together with the hidden `exchange_rate` field the
// stock form posts. A failed fetch renders the error and leaves the field out,
// so holdings are then valued without conversion.
pub async fn get_exchange_rate(State(state): State<AppState>) -> Response {
    let ctx = match state.rates.fetch().await {
        Ok(record) => json!({
            "rate": format!("{:.2}", record.rate),
            "rate_raw": record.rate.normalize().to_string(),
            "source": record.source,
            "timestamp": record.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            "error": serde_json::Value::Null,
        }),
        Err(e) => json!({
            "rate": serde_json::Value::Null,
            "error": e.to_string(),
        }),
    };

    let html = state
        .hbs
        .render("partials/exchange_rate", &ctx)
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}
