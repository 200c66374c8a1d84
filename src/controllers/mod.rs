pub mod home_controller;
pub mod holdings_controller;
pub mod exchange_rate_controller;
