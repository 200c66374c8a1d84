use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// IDR per USD, as validated at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateRecord {
    pub rate: Decimal,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}
