use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub lots: Decimal,

    #[serde(rename = "valueIDR")]
    pub value_idr: Decimal,
    #[serde(rename = "valueUSD")]
    pub value_usd: Decimal,

    // currency of the quote the values were derived from
    pub currency: Currency,
    pub price: Decimal,

    // lots * 100
    pub shares: Decimal,

    #[serde(rename = "type")]
    pub kind: AssetType,
    pub added_at: DateTime<Utc>,
}
