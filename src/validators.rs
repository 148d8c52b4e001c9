//! Field-scoped input validation.
//!
//! Every check fails with a `Validation` error naming the offending field;
//! callers report it and never retry.

use chrono::NaiveDate;

use crate::error::{AppError, Result};

const MIN_PRICE: f64 = 0.01;
const MAX_PRICE: f64 = 1_000_000.0;
const MAX_QUANTITY: u32 = 1_000_000;
const MAX_ORDER_ID_LEN: usize = 50;
pub const MAX_SCORE: u8 = 12;

/// Validate a symbol: `EXCHANGE:SYMBOL` (e.g. `NSE:INFY`) or a bare
/// alphanumeric index name (e.g. `NIFTY50`). Returns the normalized
/// (trimmed, uppercased) form.
pub fn validate_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(AppError::validation("symbol", "symbol cannot be empty"));
    }

    let valid = match symbol.split_once(':') {
        Some((exchange, name)) => {
            exchange.len() >= 3
                && exchange.chars().all(|c| c.is_ascii_uppercase())
                && !name.is_empty()
                && name.len() <= 20
                && name.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => symbol.chars().all(|c| c.is_ascii_alphanumeric()),
    };

    if !valid {
        return Err(AppError::validation(
            "symbol",
            format!("invalid symbol format: {} (expected EXCHANGE:SYMBOL, e.g. NSE:INFY)", symbol),
        ));
    }

    Ok(symbol)
}

/// Validate a price is finite and within [0.01, 1_000_000].
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(AppError::validation("price", "price must be finite"));
    }
    if price < MIN_PRICE {
        return Err(AppError::validation(
            "price",
            format!("price {} is below minimum {}", price, MIN_PRICE),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(
            "price",
            format!("price {} exceeds maximum {}", price, MAX_PRICE),
        ));
    }
    Ok(())
}

/// Validate an order quantity is within [1, 1_000_000].
pub fn validate_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(AppError::validation("quantity", "quantity must be at least 1"));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(
            "quantity",
            format!("quantity {} exceeds maximum {}", quantity, MAX_QUANTITY),
        ));
    }
    Ok(())
}

/// Validate a `YYYY-MM-DD` date string, returning the parsed date.
pub fn validate_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(
            "date",
            format!("invalid date format: {} (expected YYYY-MM-DD)", date_str),
        )
    })
}

/// Validate a confirmation score lies in [0, 12].
pub fn validate_score(score: u8) -> Result<()> {
    if score > MAX_SCORE {
        return Err(AppError::validation(
            "score",
            format!("score {} out of range [0, {}]", score, MAX_SCORE),
        ));
    }
    Ok(())
}

/// Validate a broker order id: non-empty, at most 50 characters.
pub fn validate_order_id(order_id: &str) -> Result<()> {
    if order_id.trim().is_empty() {
        return Err(AppError::validation("order_id", "order id cannot be empty"));
    }
    if order_id.len() > MAX_ORDER_ID_LEN {
        return Err(AppError::validation(
            "order_id",
            format!("order id too long: {} > {} chars", order_id.len(), MAX_ORDER_ID_LEN),
        ));
    }
    Ok(())
}

/// Validate a long entry bracket: `stop_loss < entry_price < take_profit`,
/// all positive prices.
pub fn validate_entry(entry_price: f64, stop_loss: f64, take_profit: f64) -> Result<()> {
    validate_price(entry_price)?;
    validate_price(stop_loss)?;
    validate_price(take_profit)?;

    if stop_loss >= entry_price {
        return Err(AppError::validation(
            "stop_loss",
            format!("stop loss ({}) must be below entry ({})", stop_loss, entry_price),
        ));
    }
    if take_profit <= entry_price {
        return Err(AppError::validation(
            "take_profit",
            format!("take profit ({}) must be above entry ({})", take_profit, entry_price),
        ));
    }
    Ok(())
}
