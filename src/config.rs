use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    // POST endpoint of the price lookup service
    pub price_api_url: String,
    pub exchange_rate_url: String,

    pub submit_debounce_ms: u64,
    pub success_clear_ms: u64,
}

pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let price_api_url = env::var("PRICE_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080/api/prices".to_string());

    let exchange_rate_url = env::var("EXCHANGE_RATE_URL")
        .unwrap_or_else(|_| DEFAULT_EXCHANGE_RATE_URL.to_string());

    Settings {
        host,
        port,
        price_api_url,
        exchange_rate_url,
        submit_debounce_ms: env_u64("SUBMIT_DEBOUNCE_MS", 1500),
        success_clear_ms: env_u64("SUCCESS_CLEAR_MS", 3000),
    }
}
