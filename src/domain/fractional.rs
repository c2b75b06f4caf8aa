//! Fractional US Treasury price notation.
//!
//! Treasury prices quote in 32nds plus eighths of a 32nd: `99-16+` reads as
//! 99 + 16/32 + 4/256. The textual form is `I-xyZ` where `xy` is the number
//! of 32nds (two digits, 00–31) and `Z` is the remaining 256ths (0–7, with
//! `+` standing for 4). All conversions are exact on the 1/256 grid.

use crate::domain::types::{TradingError, TradingResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TICKS_PER_POINT: i64 = 256;

/// Parse a fractional price string into its exact decimal value.
pub fn parse_price(text: &str) -> TradingResult<Decimal> {
    let invalid = || TradingError::InvalidPrice(text.to_string());

    let (whole, frac) = text.split_once('-').ok_or_else(invalid)?;
    if frac.len() != 3 || !frac.is_ascii() {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let thirty_seconds: i64 = frac[..2].parse().map_err(|_| invalid())?;
    if thirty_seconds > 31 {
        return Err(invalid());
    }
    let eighths = match &frac[2..] {
        "+" => 4,
        digit => {
            let digit: i64 = digit.parse().map_err(|_| invalid())?;
            if digit > 7 {
                return Err(invalid());
            }
            digit
        }
    };

    let ticks = thirty_seconds * 8 + eighths;
    Ok(Decimal::from(whole) + Decimal::from(ticks) / Decimal::from(TICKS_PER_POINT))
}

/// Render a decimal price in fractional notation.
///
/// The value is rounded to the nearest 1/256 before formatting, so prices
/// derived from grid arithmetic (mids, spreads) render without drift.
pub fn format_price(value: Decimal) -> String {
    let whole = value.trunc();
    let mut ticks = ((value - whole) * Decimal::from(TICKS_PER_POINT))
        .round()
        .to_i64()
        .unwrap_or(0);
    let mut whole = whole.to_i64().unwrap_or(0);
    if ticks == TICKS_PER_POINT {
        whole += 1;
        ticks = 0;
    }

    let thirty_seconds = ticks / 8;
    let eighths = ticks % 8;
    if eighths == 4 {
        format!("{whole}-{thirty_seconds:02}+")
    } else {
        format!("{whole}-{thirty_seconds:02}{eighths}")
    }
}

/// One tick: 1/256 of a point.
pub fn tick() -> Decimal {
    dec!(1) / Decimal::from(TICKS_PER_POINT)
}
