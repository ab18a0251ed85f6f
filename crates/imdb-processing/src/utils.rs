//! Shared string parsing helpers for the cleaning stages and the artifact reader.
//!
//! All parsers here are lenient: they return `None` instead of an error when a
//! value cannot be read, and the caller decides whether that is a null or a
//! schema violation.

use polars::prelude::*;

// =============================================================================
// Decoration stripping
// =============================================================================

/// Suffix attached to runtimes in the raw dataset ("142 min").
pub const RUNTIME_SUFFIX: &str = " min";

/// Characters removed from currency-formatted revenue ("$133,414,000").
pub const CURRENCY_DECORATION: [char; 2] = ['$', ','];

/// Thousands separator, stripped from vote counts.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Remove every occurrence of the runtime suffix.
///
/// ```rust,ignore
/// assert_eq!(strip_runtime_suffix("142 min"), "142");
/// ```
pub fn strip_runtime_suffix(s: &str) -> String {
    s.replace(RUNTIME_SUFFIX, "")
}

/// Remove currency symbols and thousands separators.
///
/// ```rust,ignore
/// assert_eq!(strip_currency("$133,414,000"), "133414000");
/// ```
pub fn strip_currency(s: &str) -> String {
    s.chars()
        .filter(|c| !CURRENCY_DECORATION.contains(c))
        .collect()
}

// =============================================================================
// Lenient numeric parsing
// =============================================================================

/// Parse a float, rejecting blanks and non-finite values.
pub fn parse_float(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer. Integral decimals such as "1994.0" are accepted,
/// fractional ones are not.
pub fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let float = parse_float(trimmed)?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Parse an integer that must fit in `i32`.
pub fn parse_i32(s: &str) -> Option<i32> {
    parse_integer(s).and_then(|v| i32::try_from(v).ok())
}

/// Returns true when the value is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

// =============================================================================
// Series helpers
// =============================================================================

/// Materialize a column as a string series, casting when needed.
///
/// Stages operate on text so that coercion is always performed by the
/// pipeline, whatever dtype the caller loaded the frame with.
pub fn column_as_text(df: &DataFrame, name: &str) -> PolarsResult<Series> {
    let series = df.column(name)?.as_materialized_series().clone();
    if series.dtype() == &DataType::String {
        Ok(series)
    } else {
        series.cast(&DataType::String)
    }
}

/// Collect a string series into owned optional values.
pub fn text_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
