//! Ticker → exchange-qualified symbol resolution.
//!
//! - JK / US selector => exactly one suffixed candidate
//! - auto-detect => bare ticker, `.JK`, `.US` (priority order)
//! - the first priced candidate wins, never the best price
//! - auto-detect only: case-insensitive scan of the returned keys as a last resort

use crate::{
    error::{DataError, PriceMiss},
    models::{Exchange, PriceBook, PriceQuote, QuoteLookup},
};

/// Trimmed, upper-cased ticker.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub fn candidate_symbols(raw_ticker: &str, exchange: Exchange) -> Vec<String> {
    let base = normalize_ticker(raw_ticker);
    match exchange {
        Exchange::Us => vec![format!("{base}.US")],
        Exchange::Jk => vec![format!("{base}.JK")],
        Exchange::Auto => vec![base.clone(), format!("{base}.JK"), format!("{base}.US")],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuote {
    /// Key of the price book entry that was used.
    pub symbol: String,
    pub quote: PriceQuote,
    pub via_fallback: bool,
}

pub fn resolve_quote(
    book: &PriceBook,
    raw_ticker: &str,
    exchange: Exchange,
    candidates: &[String],
) -> Result<ResolvedQuote, DataError> {
    let mut seen_unpriced = false;

    for symbol in candidates {
        match book.lookup(symbol) {
            QuoteLookup::Priced(quote) => {
                return Ok(ResolvedQuote {
                    symbol: symbol.clone(),
                    quote,
                    via_fallback: false,
                });
            }
            QuoteLookup::Unpriced => seen_unpriced = true,
            QuoteLookup::Absent => {}
        }
    }

    if exchange == Exchange::Auto {
        let base = normalize_ticker(raw_ticker);
        let jk = format!("{base}.JK");
        let us = format!("{base}.US");

        for (key, entry) in book.entries() {
            let upper = key.to_uppercase();
            if upper != jk && upper != us {
                continue;
            }
            match entry {
                QuoteLookup::Priced(quote) => {
                    tracing::debug!(symbol = key, "fallback matched ticker");
                    return Ok(ResolvedQuote {
                        symbol: key.to_string(),
                        quote,
                        via_fallback: true,
                    });
                }
                QuoteLookup::Unpriced => seen_unpriced = true,
                QuoteLookup::Absent => {}
            }
        }
    }

    Err(DataError::PriceNotFound {
        symbols: candidates.to_vec(),
        cause: if seen_unpriced {
            PriceMiss::Unpriced
        } else {
            PriceMiss::Absent
        },
    })
}
