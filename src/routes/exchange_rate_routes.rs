use axum::{Router, routing::get};

use crate::{AppState, controllers::exchange_rate_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/exchange-rate", get(exchange_rate_controller::get_exchange_rate))
}
