//! Input validation and parsing
//!
//! The presentation layer hands us raw text from numeric input fields.
//! These helpers turn that text into finite numbers or an
//! [`EngineError::InvalidInput`].

use crate::errors::{EngineError, EngineResult};
use once_cell::sync::Lazy;

/// Leading numeric prefix, as read by a lenient numeric text field.
static NUMERIC_PREFIX: Lazy<regex_lite::Regex> = Lazy::new(|| {
    regex_lite::Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Reject NaN and infinities
pub fn validate_finite(field: &str, value: f64) -> EngineResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(EngineError::InvalidInput(format!(
            "{} must be a valid number",
            field
        )));
    }
    Ok(())
}

/// Parse the leading number out of free text
///
/// Leading whitespace is skipped and anything after the numeric prefix is
/// ignored, so `" 12.5 km"` reads as `12.5`. Text with no numeric prefix
/// (or one that overflows to infinity) is rejected.
pub fn parse_number(text: &str) -> EngineResult<f64> {
    let trimmed = text.trim_start();
    let prefix = NUMERIC_PREFIX
        .find(trimmed)
        .map(|m| m.as_str())
        .ok_or_else(|| EngineError::InvalidInput(format!("not a number: {:?}", text)))?;

    let value: f64 = prefix
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("not a number: {:?}", text)))?;

    validate_finite("Value", value)?;
    Ok(value)
}

/// Parse a monetary amount
///
/// Stricter than [`parse_number`]: the whole trimmed text must be a number.
pub fn parse_amount(text: &str) -> EngineResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput("Amount cannot be empty".to_string()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("not an amount: {:?}", text)))?;

    validate_finite("Amount", value)?;
    Ok(value)
}
