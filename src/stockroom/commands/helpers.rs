//! Parsing and validation of raw operator input.
//!
//! Commands receive text exactly as typed. Everything here trims first and
//! reports [`StockError::Validation`] on bad input, before any store access.

use crate::error::{Result, StockError};
use crate::expiry::parse_date;
use chrono::NaiveDate;

pub fn required(field: &str, raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StockError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Optional free text: blank input means "no value".
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A quantity that may be zero but never negative.
pub fn parse_quantity(raw: &str) -> Result<i64> {
    let value = required("Quantity", raw)?;
    let quantity: i64 = value
        .parse()
        .map_err(|_| StockError::Validation(format!("Invalid quantity: {}", value)))?;
    if quantity < 0 {
        return Err(StockError::Validation(format!(
            "Quantity cannot be negative: {}",
            quantity
        )));
    }
    Ok(quantity)
}

/// An amount moved in or out of stock: a whole number above zero.
pub fn parse_amount(raw: &str) -> Result<i64> {
    let value = required("Amount", raw)?;
    let amount: i64 = value
        .parse()
        .map_err(|_| StockError::Validation(format!("Invalid amount: {}", value)))?;
    if amount <= 0 {
        return Err(StockError::Validation(format!(
            "Amount must be greater than zero: {}",
            amount
        )));
    }
    Ok(amount)
}

pub fn parse_decimal(field: &str, raw: &str) -> Result<f64> {
    let value = required(field, raw)?;
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(StockError::Validation(format!(
            "Invalid {}: {}",
            field.to_lowercase(),
            value
        ))),
    }
}

pub fn parse_non_negative_decimal(field: &str, raw: &str) -> Result<f64> {
    let number = parse_decimal(field, raw)?;
    if number < 0.0 {
        return Err(StockError::Validation(format!(
            "{} cannot be negative: {}",
            field, number
        )));
    }
    Ok(number)
}

/// Blank means no expiry date; anything else must be `YYYY-MM-DD`.
pub fn parse_expiry(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match optional_text(raw) {
        None => Ok(None),
        Some(text) => parse_date(&text).map(Some).ok_or_else(|| {
            StockError::Validation(format!(
                "Expiry date must use the YYYY-MM-DD format: {}",
                text
            ))
        }),
    }
}
