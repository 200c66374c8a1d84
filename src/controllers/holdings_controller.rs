use std::{str::FromStr, sync::Arc, time::Duration};

use axum::{
    extract::{Form, Query, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{Exchange, StockForm, POPULAR_STOCKS},
    services::stock_input::{FormStatus, StatusSnapshot, StockInput, SubmitTiming},
    AppState,
};

#[derive(Deserialize)]
pub struct StockInputForm {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub lots: String,
    #[serde(default)]
    pub exchange: String,

    // hidden field owned by the exchange-rate panel; blank when the fetch failed
    #[serde(default)]
    pub exchange_rate: String,
}

#[derive(Deserialize)]
pub struct QuickPickQuery {
    pub pick: Option<String>,
}

fn fmt2(v: Decimal) -> String {
    format!("{:.2}", v)
}

fn parse_rate(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw).ok().filter(|r| *r > Decimal::ZERO)
}

fn timing(state: &AppState) -> SubmitTiming {
    SubmitTiming {
        debounce: Duration::from_millis(state.settings.submit_debounce_ms),
        success_clear: Duration::from_millis(state.settings.success_clear_ms),
    }
}

fn new_input(state: &AppState, status: Arc<FormStatus>) -> StockInput {
    StockInput::new(state.prices.clone(), state.holdings.clone())
        .with_observer(status)
        .with_timing(timing(state))
}

/// Template context shared by the home page and the `partials/stock_form` endpoint.
pub fn form_ctx(fields: &StockForm, status: &StatusSnapshot) -> serde_json::Value {
    let exchanges: Vec<serde_json::Value> = Exchange::ALL
        .iter()
        .map(|ex| {
            json!({
                "value": ex.selector(),
                "label": ex.label(),
                "selected": *ex == fields.exchange,
            })
        })
        .collect();

    json!({
        "ticker": fields.ticker,
        "lots": fields.lots,
        "exchanges": exchanges,
        "loading": status.loading,
        "error": status.error,
        "success": status.success,
        "popular": POPULAR_STOCKS,
    })
}

fn render_form(state: &AppState, ctx: &serde_json::Value) -> String {
    state
        .hbs
        .render("partials/stock_form", ctx)
        .unwrap_or_else(|e| format!("template error: {e}"))
}

// POST /holdings (HTMX partial)
pub async fn post_holding(
    State(state): State<AppState>,
    Form(form): Form<StockInputForm>,
) -> Response {
    let status = Arc::new(FormStatus::new());
    let input = new_input(&state, status.clone()).with_fields(StockForm {
        ticker: form.ticker,
        lots: form.lots,
        exchange: Exchange::from_selector(&form.exchange),
    });

    let result = input.submit(parse_rate(&form.exchange_rate)).await;

    let ctx = form_ctx(&input.fields(), &status.snapshot());
    let mut res = (StatusCode::OK, Html(render_form(&state, &ctx))).into_response();

    if result.is_ok() {
        res.headers_mut()
            .insert("HX-Trigger", HeaderValue::from_static("holdingsUpdated"));
    }
    res
}

// GET /holdings/form?pick=BBCA (HTMX partial)
pub async fn get_stock_form(
    State(state): State<AppState>,
    Query(query): Query<QuickPickQuery>,
) -> Response {
    let status = Arc::new(FormStatus::new());
    let input = new_input(&state, status.clone());

    let pick = query.pick.unwrap_or_default();
    if let Some(stock) = POPULAR_STOCKS
        .iter()
        .find(|s| s.ticker.eq_ignore_ascii_case(pick.trim()))
    {
        input.quick_pick(stock);
    }

    let ctx = form_ctx(&input.fields(), &status.snapshot());
    (StatusCode::OK, Html(render_form(&state, &ctx))).into_response()
}

// GET /holdings (HTMX partial)
pub async fn get_holdings(State(state): State<AppState>) -> Response {
    let items: Vec<serde_json::Value> = state
        .holdings
        .list()
        .await
        .into_iter()
        .map(|h| {
            json!({
                "ticker": h.ticker,
                "lots": h.lots.normalize().to_string(),
                "shares": h.shares.normalize().to_string(),
                "price": fmt2(h.price),
                "currency": h.currency.code(),
                "value_idr": fmt2(h.value_idr),
                "value_usd": fmt2(h.value_usd),
                "added_at": h.added_at.format("%Y-%m-%d %H:%M").to_string(),
            })
        })
        .collect();

    let html = state
        .hbs
        .render("partials/holdings_list", &json!({ "items": items }))
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}
