use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{DataError, TrackerError},
    models::PriceBook,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesRequest {
    pub stocks: Vec<String>,
    pub crypto: Vec<String>,
    pub exchange_rate: Option<Decimal>,
}

impl PricesRequest {
    pub fn stocks(symbols: Vec<String>, exchange_rate: Option<Decimal>) -> Self {
        Self {
            stocks: symbols,
            crypto: vec![],
            exchange_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PricesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prices: PriceBook,
}

// `"prices": null` means nothing was priced
fn null_as_empty<'de, D>(deserializer: D) -> Result<PriceBook, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PriceBook>::deserialize(deserializer)?.unwrap_or_default())
}

/// Batch price lookup for a set of symbols.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn fetch_prices(&self, request: &PricesRequest) -> Result<PriceBook, TrackerError>;
}

#[derive(Clone)]
pub struct PricesClient {
    http: Client,
    url: String,
}

impl PricesClient {
    pub fn new(url: String) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl PriceLookup for PricesClient {
    async fn fetch_prices(&self, request: &PricesRequest) -> Result<PriceBook, TrackerError> {
        let res = self.http.post(&self.url).json(request).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(TrackerError::PriceService { status, body });
        }

        let body = res.text().await?;
        let data = serde_json::from_str::<PricesResponse>(&body)
            .map_err(|e| DataError::MalformedResponse(e.to_string()))?;
        tracing::debug!(
            symbols = ?data.prices.symbols().collect::<Vec<_>>(),
            "price service returned prices"
        );
        Ok(data.prices)
    }
}
