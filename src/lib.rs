//! Library entrypoint for the portfolio tracker.
//!
//! Integration tests under `tests/` import the app state, routers, controllers
//! and services from here.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[path = "views/render.rs"]
pub mod render;
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub prices: Arc<dyn services::prices_client::PriceLookup>,
    pub rates: services::exchange_rate::ExchangeRateClient,
    pub holdings: Arc<services::holding_store::HoldingStore>,
}

impl AppState {
    pub fn from_settings(settings: config::Settings) -> Self {
        let prices = services::prices_client::PricesClient::new(settings.price_api_url.clone());
        let rates = services::exchange_rate::ExchangeRateClient::new(settings.exchange_rate_url.clone());

        Self {
            hbs: templates::build_handlebars(),
            settings,
            prices: Arc::new(prices),
            rates,
            holdings: Arc::new(services::holding_store::HoldingStore::new()),
        }
    }
}
