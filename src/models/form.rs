use serde::Serialize;

/// Exchange selector of the stock form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// Indonesia Stock Exchange, `.JK` suffix.
    Jk,
    /// US markets, `.US` suffix.
    Us,
    /// Try the bare ticker, then `.JK`, then `.US`.
    Auto,
}

impl Exchange {
    /// Maps the selector value; anything other than "JK" or "US" is auto-detect.
    pub fn from_selector(value: &str) -> Self {
        match value.trim() {
            "JK" => Exchange::Jk,
            "US" => Exchange::Us,
            _ => Exchange::Auto,
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            Exchange::Jk => "JK",
            Exchange::Us => "US",
            Exchange::Auto => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Exchange::Jk => "Indonesia (IDX)",
            Exchange::Us => "US Markets (NASDAQ/NYSE)",
            Exchange::Auto => "Other (auto-detect)",
        }
    }

    pub const ALL: [Exchange; 3] = [Exchange::Jk, Exchange::Us, Exchange::Auto];
}

/// Raw field values of one stock form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockForm {
    pub ticker: String,
    pub lots: String,
    pub exchange: Exchange,
}

impl Default for StockForm {
    fn default() -> Self {
        Self {
            ticker: String::new(),
            lots: "1".to_string(),
            exchange: Exchange::Jk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularStock {
    pub ticker: &'static str,
    pub name: &'static str,
    #[serde(serialize_with = "serialize_exchange")]
    pub exchange: Exchange,
}

fn serialize_exchange<S: serde::Serializer>(exchange: &Exchange, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(exchange.selector())
}

pub const POPULAR_STOCKS: [PopularStock; 6] = [
    PopularStock { ticker: "BBCA", name: "Bank Central Asia", exchange: Exchange::Jk },
    PopularStock { ticker: "BBRI", name: "Bank Rakyat Indonesia", exchange: Exchange::Jk },
    PopularStock { ticker: "AAPL", name: "Apple Inc.", exchange: Exchange::Us },
    PopularStock { ticker: "MSFT", name: "Microsoft", exchange: Exchange::Us },
    PopularStock { ticker: "NVDA", name: "NVIDIA Corporation", exchange: Exchange::Us },
    PopularStock { ticker: "TSLA", name: "Tesla", exchange: Exchange::Us },
];
