use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

use crate::{
    error::{DataError, TrackerError},
    models::ExchangeRateRecord,
};

pub const RATE_SOURCE: &str = "Exchange Rate API";

/// Plausible IDR per USD; both bounds are accepted.
pub const MIN_IDR_RATE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
pub const MAX_IDR_RATE: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);

/// Extracts and sanity-checks `rates.IDR` from a USD-based rates payload.
pub fn validate_rate(body: &Value) -> Result<Decimal, DataError> {
    let raw = body
        .get("rates")
        .and_then(|rates| rates.get("IDR"))
        .unwrap_or(&Value::Null);

    let rate = match raw {
        Value::Null => return Err(DataError::ExchangeRateIncomplete),
        Value::Number(n) => n.as_f64().ok_or(DataError::InvalidExchangeRate)?,
        _ => return Err(DataError::InvalidExchangeRate),
    };

    if rate == 0.0 {
        return Err(DataError::ExchangeRateIncomplete);
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(DataError::InvalidExchangeRate);
    }

    let rate = Decimal::from_f64(rate).ok_or(DataError::InvalidExchangeRate)?;
    if rate < MIN_IDR_RATE || rate > MAX_IDR_RATE {
        return Err(DataError::ExchangeRateOutOfRange(rate));
    }
    Ok(rate)
}

#[derive(Clone)]
pub struct ExchangeRateClient {
    http: Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new(url: String) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }

    /// Latest USD→IDR rate. Every failure is returned; there is no default rate.
    pub async fn fetch(&self) -> Result<ExchangeRateRecord, TrackerError> {
        let result = self.fetch_inner().await;
        if let Err(e) = &result {
            tracing::error!("Error fetching exchange rate: {e}");
        }
        result
    }

    async fn fetch_inner(&self) -> Result<ExchangeRateRecord, TrackerError> {
        let res = self.http.get(&self.url).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(TrackerError::ExchangeRateService { status, body });
        }

        let text = res.text().await?;
        let body = serde_json::from_str::<Value>(&text)
            .map_err(|e| DataError::MalformedResponse(e.to_string()))?;
        let rate = validate_rate(&body)?;

        Ok(ExchangeRateRecord {
            rate,
            source: RATE_SOURCE.to_string(),
            timestamp: Utc::now(),
        })
    }
}
