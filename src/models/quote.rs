use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "IDR")]
    Idr,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "IDR" => Some(Currency::Idr),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

/// A usable quote: positive price in a known currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub price: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteLookup {
    /// No key for the symbol, or the key maps to `null`.
    Absent,
    /// The key exists but the price is missing, zero, negative or its currency is unknown.
    Unpriced,
    Priced(PriceQuote),
}

/// Symbol → quote entries as returned by the price service, in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBook {
    entries: Vec<(String, QuoteLookup)>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, symbol: &str) -> QuoteLookup {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, q)| *q)
            .unwrap_or(QuoteLookup::Absent)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, QuoteLookup)> {
        self.entries.iter().map(|(s, q)| (s.as_str(), *q))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decimal_from_json(v: &Value) -> Option<Decimal> {
    let Value::Number(n) = v else {
        return None;
    };
    n.as_i64()
        .map(Decimal::from)
        .or_else(|| n.as_f64().and_then(Decimal::from_f64))
}

fn classify(entry: &Value) -> QuoteLookup {
    let Some(obj) = entry.as_object() else {
        return if entry.is_null() {
            QuoteLookup::Absent
        } else {
            QuoteLookup::Unpriced
        };
    };

    let price = obj.get("price").and_then(decimal_from_json);
    let currency = obj
        .get("currency")
        .and_then(Value::as_str)
        .and_then(Currency::from_code);

    match (price, currency) {
        (Some(price), Some(currency)) if price > Decimal::ZERO => {
            QuoteLookup::Priced(PriceQuote { price, currency })
        }
        _ => QuoteLookup::Unpriced,
    }
}

impl<'de> Deserialize<'de> for PriceBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json's preserve_order keeps the response key order here
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;

        let entries = raw
            .iter()
            .map(|(symbol, entry)| (symbol.clone(), classify(entry)))
            .collect();

        Ok(PriceBook { entries })
    }
}
