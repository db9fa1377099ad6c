//! Shared query parameter types and lenient-parse helpers.
//!
//! Pagination and filter values arrive as raw strings so a non-numeric
//! `?page=abc` becomes a 400 validation error instead of an extractor
//! rejection or, worse, a malformed query.

use serde::Deserialize;

use pawhome_core::error::CoreError;

/// Default page size for the availability listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Query parameters for the availability listing
/// (`?page=&count=&gender=&age=&weight=`).
#[derive(Debug, Default, Deserialize)]
pub struct AvailablePetsQuery {
    pub page: Option<String>,
    pub count: Option<String>,
    pub gender: Option<String>,
    /// Life-stage label (`KID`/`JUNIOR`/`SENIOR`/`ADULT`); unknown labels
    /// impose no filter.
    pub age: Option<String>,
    pub weight: Option<String>,
}

/// Parse an optional positive integer parameter, defaulting when absent.
pub fn parse_positive(name: &str, value: Option<&str>, default: i64) -> Result<i64, CoreError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CoreError::Validation(format!(
            "'{name}' must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Parse an optional finite float parameter.
pub fn parse_weight(value: Option<&str>) -> Result<Option<f64>, CoreError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => Ok(Some(w)),
        _ => Err(CoreError::Validation(format!(
            "'weight' must be a positive number, got '{raw}'"
        ))),
    }
}
