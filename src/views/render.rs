use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::AppState;

/// True for requests issued by htmx, which only want the page body.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub fn render_full(
    state: &AppState,
    title: &str,
    body_html: String,
) -> Result<String, String> {
    let ctx = json!({
        "title": title,
        "body": body_html,
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}

/// Renders `template` with `ctx`, wrapped in the base layout unless the
/// request came from htmx. Template failures become a 500.
pub fn render_page<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    title: &str,
    template: &str,
    ctx: &T,
) -> Response {
    let body = match state.hbs.render(template, ctx) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(template, "render failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("template error: {e}")),
            )
                .into_response();
        }
    };

    if is_htmx(headers) {
        return (status, Html(body)).into_response();
    }

    match render_full(state, title, body) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}
