//! Error taxonomy for holding submission and exchange-rate lookups.
//!
//! Every failure surfaces as a [`TrackerError`]; [`TrackerError::kind`] groups
//! the variants into validation, network, data and callback failures.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Stock code and lot amount must be filled")]
    EmptyFields,

    #[error("Lot amount must be greater than 0")]
    NonPositiveLots,

    #[error("Lot amount is too large")]
    LotsOutOfRange,
}

/// Why no candidate symbol produced a usable quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMiss {
    /// None of the symbols appeared in the response.
    Absent,
    /// At least one symbol appeared, but without a usable price.
    Unpriced,
}

/// A service answered, but with data we cannot use.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error(
        "Stock price data not found or API limit reached. Please check the code and try again later."
    )]
    PriceNotFound {
        symbols: Vec<String>,
        cause: PriceMiss,
    },

    #[error("Exchange rate data incomplete")]
    ExchangeRateIncomplete,

    #[error("Invalid exchange rate value")]
    InvalidExchangeRate,

    #[error("Exchange rate out of expected range")]
    ExchangeRateOutOfRange(Decimal),

    /// Price × shares (or its conversion) does not fit a decimal.
    #[error("Holding value is out of range")]
    ValueOutOfRange,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Data,
    Callback,
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The price service returned a non-success status.
    #[error("Failed to fetch stock price (HTTP {status}): {body}")]
    PriceService { status: u16, body: String },

    /// The exchange-rate service returned a non-success status.
    #[error("Failed to fetch exchange rate: {status}")]
    ExchangeRateService { status: u16, body: String },

    /// The request never produced a response (connect, TLS, body read).
    #[error("Network error: {0}")]
    Transport(String),

    #[error(transparent)]
    Data(#[from] DataError),

    /// The add-callback rejected the holding.
    #[error("Failed to add holding: {0}")]
    AddFailed(String),
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Validation(_) => ErrorKind::Validation,
            TrackerError::PriceService { .. }
            | TrackerError::ExchangeRateService { .. }
            | TrackerError::Transport(_) => ErrorKind::Network,
            TrackerError::Data(_) => ErrorKind::Data,
            TrackerError::AddFailed(_) => ErrorKind::Callback,
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::Transport(err.to_string())
    }
}
