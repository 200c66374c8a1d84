pub mod prices_client;
pub mod exchange_rate;
pub mod holding_store;

pub mod ticker_resolver;
pub mod valuation;
pub mod stock_input;
