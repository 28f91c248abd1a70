//! Unit normalization for located tokens.
//!
//! Unit handling is literal: known unit tokens are removed from the string,
//! nothing is converted except millimetres to inches.

use crate::error::SpecSheetError;
use crate::schema::Field;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Unit tokens stripped from electrical and weight values.
pub const VOLT_UNITS: &[&str] = &["VAC", "V AC", "V"];
pub const AMP_UNITS: &[&str] = &["A"];
pub const HERTZ_UNITS: &[&str] = &["Hz"];
pub const POUND_UNITS: &[&str] = &["lbs", "lb"];

/// Inches per millimetre.
pub fn inches_per_mm() -> Decimal {
    Decimal::new(393_701, 7)
}

/// Remove `units` from the start and end of `raw`.
///
/// Only whole tokens at the edges are removed, so `"5A"` loses its `A`
/// but `"AMPS 5"` is untouched by `"A"`. Returns `None` if nothing but the
/// unit remains.
pub fn strip_units(raw: &str, units: &[&str]) -> Option<String> {
    let mut s = raw.trim();
    loop {
        let before = s;
        for unit in units {
            if let Some(rest) = s.strip_suffix(unit) {
                if rest.is_empty() || !rest.ends_with(|c: char| c.is_alphabetic()) {
                    s = rest.trim_end();
                }
            }
            if let Some(rest) = s.strip_prefix(unit) {
                if rest.is_empty() || !rest.starts_with(|c: char| c.is_alphabetic()) {
                    s = rest.trim_start();
                }
            }
        }
        if s == before {
            break;
        }
    }

    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Strip units from an optional located value.
pub fn strip_opt(raw: Option<&str>, units: &[&str]) -> Option<String> {
    raw.and_then(|r| strip_units(r, units))
}

/// Convert a millimetre token (e.g. `"610"`, `"610 mm"`, `"610 [mm]"`) to
/// inches. The product is exact; no rounding is applied.
///
/// Missing input is `Ok(None)`; a token that is not a number is a
/// `Normalization` error for `field`.
pub fn mm_to_inches(raw: Option<&str>, field: Field) -> Result<Option<Decimal>, SpecSheetError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let token = raw
        .trim()
        .trim_end_matches(']')
        .trim_end_matches("mm")
        .trim_end()
        .trim_end_matches('[')
        .trim();
    if token.is_empty() {
        return Ok(None);
    }

    let mm = Decimal::from_str(token).map_err(|e| SpecSheetError::Normalization {
        field: field.name().to_string(),
        token: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Some(mm * inches_per_mm()))
}

/// Collapse runs of whitespace (including line breaks) to single spaces.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Combine a high/low pair into the catalog's range display string.
pub fn compose_range(high: &str, low: &str) -> String {
    format!("High: {high}, Low: {low}")
}
