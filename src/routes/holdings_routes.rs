use axum::{Router, routing::get};

use crate::{AppState, controllers::holdings_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/holdings",
            get(holdings_controller::get_holdings).post(holdings_controller::post_holding),
        )
        .route("/holdings/form", get(holdings_controller::get_stock_form))
}
