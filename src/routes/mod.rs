use axum::Router;
use tower_http::services::ServeDir;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod holdings_routes;
pub mod exchange_rate_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = holdings_routes::add_routes(router);
    let router = exchange_rate_routes::add_routes(router);

    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(home_controller::not_found)
        .with_state(state)
}
