use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::{DataError, ValidationError},
    models::{AssetType, Currency, Holding, PriceQuote},
};

/// 1 lot = 100 shares on IDX.
pub const SHARES_PER_LOT: Decimal = Decimal::ONE_HUNDRED;

// |exponent| past which the value has certainly overflowed or rounded to zero
const MAX_EXPONENT: u64 = 64;

/// Leading `[sign] digits [. digits] [e [sign] digits]` of a lot amount.
#[derive(Debug, PartialEq)]
struct LeadingNumber<'a> {
    negative: bool,
    int: &'a str,
    frac: &'a str,
    exp: i64,
}

fn digits_end(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Reads the longest numeric prefix and ignores whatever follows it, so
/// `"1.5 lots"` is 1.5 and `"2abc"` is 2.
fn leading_number(raw: &str) -> Option<LeadingNumber<'_>> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    pos = digits_end(bytes, pos);
    let int = &s[int_start..pos];

    let mut frac = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = digits_end(bytes, frac_start);
        frac = &s[frac_start..frac_end];
        pos = frac_end;
    }

    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let mut exp = 0i64;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let exp_end = digits_end(bytes, exp_pos);
        // "2e" or "2e-" keeps just the mantissa
        if exp_end > exp_pos {
            let magnitude = s[exp_pos..exp_end].parse::<i64>().unwrap_or(i64::MAX);
            exp = if exp_negative { -magnitude } else { magnitude };
        }
    }

    Some(LeadingNumber {
        negative,
        int,
        frac,
        exp,
    })
}

fn to_decimal(n: &LeadingNumber<'_>) -> Result<Decimal, ValidationError> {
    let int = if n.int.is_empty() { "0" } else { n.int };
    let literal = if n.frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{}", n.frac)
    };

    let mut value = Decimal::from_str(&literal).map_err(|_| ValidationError::LotsOutOfRange)?;

    if value.is_zero() {
        return Ok(value);
    }
    if n.exp.unsigned_abs() > MAX_EXPONENT {
        return if n.exp > 0 {
            Err(ValidationError::LotsOutOfRange)
        } else {
            Ok(Decimal::ZERO)
        };
    }
    for _ in 0..n.exp.unsigned_abs() {
        value = if n.exp > 0 {
            value
                .checked_mul(Decimal::TEN)
                .ok_or(ValidationError::LotsOutOfRange)?
        } else {
            value.checked_div(Decimal::TEN).unwrap_or(Decimal::ZERO)
        };
    }

    if n.negative {
        value.set_sign_negative(true);
    }
    Ok(value)
}

/// Validates the two required text fields and parses the lot amount.
pub fn parse_lots(ticker: &str, lots: &str) -> Result<Decimal, ValidationError> {
    if ticker.trim().is_empty() || lots.is_empty() {
        return Err(ValidationError::EmptyFields);
    }

    let number = leading_number(lots).ok_or(ValidationError::NonPositiveLots)?;
    let parsed = to_decimal(&number)?;

    if parsed <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveLots);
    }
    Ok(parsed)
}

/// IDR and USD value of `shares` at `quote`. The side not quoted is converted
/// through `exchange_rate` (IDR per USD) or left at zero without a rate.
pub fn convert(
    quote: &PriceQuote,
    shares: Decimal,
    exchange_rate: Option<Decimal>,
) -> Result<(Decimal, Decimal), DataError> {
    let rate = exchange_rate.filter(|r| !r.is_zero());
    let quoted = quote
        .price
        .checked_mul(shares)
        .ok_or(DataError::ValueOutOfRange)?;

    match quote.currency {
        Currency::Idr => {
            let value_usd = match rate {
                Some(r) => quoted.checked_div(r).ok_or(DataError::ValueOutOfRange)?,
                None => Decimal::ZERO,
            };
            Ok((quoted, value_usd))
        }
        Currency::Usd => {
            let value_idr = match rate {
                Some(r) => quoted.checked_mul(r).ok_or(DataError::ValueOutOfRange)?,
                None => Decimal::ZERO,
            };
            Ok((value_idr, quoted))
        }
    }
}

pub fn build_holding(
    ticker: &str,
    lots: Decimal,
    quote: &PriceQuote,
    exchange_rate: Option<Decimal>,
) -> Result<Holding, DataError> {
    let shares = lots
        .checked_mul(SHARES_PER_LOT)
        .ok_or(DataError::ValueOutOfRange)?;
    let (value_idr, value_usd) = convert(quote, shares, exchange_rate)?;

    Ok(Holding {
        ticker: ticker.trim().to_uppercase(),
        lots,
        value_idr,
        value_usd,
        currency: quote.currency,
        price: quote.price,
        shares,
        kind: AssetType::Stock,
        added_at: Utc::now(),
    })
}

