//! Lenient numeric coercion for the string-encoded columns.

use super::has_column;
use crate::error::Result;
use crate::schema::{IMDB_RATING, METASCORE, REVENUE, RUNTIME, VOTES, YEAR};
use crate::types::CoercionReport;
use crate::utils::{
    THOUSANDS_SEPARATOR, column_as_text, is_blank, parse_float, parse_i32, parse_integer,
    strip_currency, strip_runtime_suffix, text_values,
};
use polars::prelude::*;
use tracing::debug;

/// Numeric type a column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericTarget {
    Int32,
    Int64,
    Float64,
}

struct CoercionRule {
    column: &'static str,
    target: NumericTarget,
    strip: fn(&str) -> String,
}

fn no_decoration(s: &str) -> String {
    s.to_string()
}

fn strip_thousands(s: &str) -> String {
    s.replace(THOUSANDS_SEPARATOR, "")
}

const RULES: [CoercionRule; 6] = [
    CoercionRule {
        column: YEAR,
        target: NumericTarget::Int32,
        strip: no_decoration,
    },
    CoercionRule {
        column: RUNTIME,
        target: NumericTarget::Int32,
        strip: strip_runtime_suffix,
    },
    CoercionRule {
        column: REVENUE,
        target: NumericTarget::Float64,
        strip: strip_currency,
    },
    CoercionRule {
        column: IMDB_RATING,
        target: NumericTarget::Float64,
        strip: no_decoration,
    },
    CoercionRule {
        column: METASCORE,
        target: NumericTarget::Float64,
        strip: no_decoration,
    },
    CoercionRule {
        column: VOTES,
        target: NumericTarget::Int64,
        strip: strip_thousands,
    },
];

/// Coerce year, runtime, revenue, rating, metascore and votes to numbers.
///
/// Decoration is stripped first (" min", "$", thousands separators). A value
/// that still does not parse becomes null; this never fails. Columns that are
/// not present are skipped. Returns one [`CoercionReport`] per coerced column.
pub fn coerce_numeric_columns(df: DataFrame) -> Result<(DataFrame, Vec<CoercionReport>)> {
    let mut df = df;
    let mut reports = Vec::with_capacity(RULES.len());

    for rule in &RULES {
        if !has_column(&df, rule.column) {
            continue;
        }
        let text = column_as_text(&df, rule.column)?;
        let (series, report) = coerce_series(&text, rule)?;
        if report.coerced_to_null > 0 {
            debug!(
                "Column '{}': {} values could not be parsed and became null",
                rule.column, report.coerced_to_null
            );
        }
        df.with_column(series)?;
        reports.push(report);
    }

    Ok((df, reports))
}

fn coerce_series(text: &Series, rule: &CoercionRule) -> Result<(Series, CoercionReport)> {
    let values = text_values(text)?;
    let mut report = CoercionReport::new(rule.column);

    // Stripped inputs, with blanks folded into nulls.
    let stripped: Vec<Option<String>> = values
        .iter()
        .map(|v| {
            if is_blank(v.as_deref()) {
                report.null_before += 1;
                None
            } else {
                v.as_deref().map(rule.strip)
            }
        })
        .collect();

    let name = text.name().clone();
    let series = match rule.target {
        NumericTarget::Int32 => {
            Series::new(name, coerce_with(&stripped, parse_i32, &mut report))
        }
        NumericTarget::Int64 => {
            Series::new(name, coerce_with(&stripped, parse_integer, &mut report))
        }
        NumericTarget::Float64 => {
            Series::new(name, coerce_with(&stripped, parse_float, &mut report))
        }
    };

    report.null_after = series.null_count();
    Ok((series, report))
}

fn coerce_with<T>(
    stripped: &[Option<String>],
    parse: impl Fn(&str) -> Option<T>,
    report: &mut CoercionReport,
) -> Vec<Option<T>> {
    stripped
        .iter()
        .map(|v| {
            let value = v.as_deref()?;
            let parsed = parse(value);
            if parsed.is_none() {
                report.coerced_to_null += 1;
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_f64(df: &DataFrame, column: &str, idx: usize) -> Option<f64> {
        df.column(column).unwrap().f64().unwrap().get(idx)
    }

    fn get_i32(df: &DataFrame, column: &str, idx: usize) -> Option<i32> {
        df.column(column).unwrap().i32().unwrap().get(idx)
    }

    fn frame(revenue: &[&str], runtime: &[&str], year: &[&str]) -> DataFrame {
        let n = revenue.len();
        df!(
            YEAR => year,
            RUNTIME => runtime,
            REVENUE => revenue,
            IMDB_RATING => vec!["8.0"; n]
        )
        .unwrap()
    }

    #[test]
    fn test_revenue_currency_parses() {
        let df = frame(&["$133,414,000"], &["142 min"], &["1994"]);
        let (df, _) = coerce_numeric_columns(df).unwrap();

        assert_eq!(df.column(REVENUE).unwrap().dtype(), &DataType::Float64);
        assert_eq!(get_f64(&df, REVENUE, 0), Some(133_414_000.0));
    }

    #[test]
    fn test_revenue_not_available_becomes_null() {
        let df = frame(&["N/A", "$1,000"], &["90 min", "91 min"], &["2000", "2001"]);
        let (df, reports) = coerce_numeric_columns(df).unwrap();

        assert_eq!(get_f64(&df, REVENUE, 0), None);
        assert_eq!(get_f64(&df, REVENUE, 1), Some(1000.0));

        let revenue = reports.iter().find(|r| r.column == REVENUE).unwrap();
        assert_eq!(revenue.coerced_to_null, 1);
        assert_eq!(revenue.null_after, 1);
    }

    #[test]
    fn test_runtime_suffix_parses() {
        let df = frame(&["$1"], &["142 min"], &["1994"]);
        let (df, _) = coerce_numeric_columns(df).unwrap();

        assert_eq!(df.column(RUNTIME).unwrap().dtype(), &DataType::Int32);
        assert_eq!(get_i32(&df, RUNTIME, 0), Some(142));
    }

    #[test]
    fn test_malformed_year_becomes_null_without_error() {
        let df = frame(&["$1", "$2"], &["1 min", "2 min"], &["PG", "1957"]);
        let (df, reports) = coerce_numeric_columns(df).unwrap();

        assert_eq!(get_i32(&df, YEAR, 0), None);
        assert_eq!(get_i32(&df, YEAR, 1), Some(1957));
        let year = reports.iter().find(|r| r.column == YEAR).unwrap();
        assert_eq!(year.null_before, 0);
        assert_eq!(year.coerced_to_null, 1);
    }

    #[test]
    fn test_blank_counts_as_null_not_coercion() {
        let df = frame(&[""], &["100 min"], &["2001"]);
        let (_, reports) = coerce_numeric_columns(df).unwrap();

        let revenue = reports.iter().find(|r| r.column == REVENUE).unwrap();
        assert_eq!(revenue.null_before, 1);
        assert_eq!(revenue.coerced_to_null, 0);
        assert_eq!(revenue.null_after, 1);
    }

    #[test]
    fn test_optional_columns_skipped_when_absent() {
        let df = frame(&["$5"], &["5 min"], &["2005"]);
        let (_, reports) = coerce_numeric_columns(df).unwrap();

        let columns: Vec<&str> = reports.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(columns, vec![YEAR, RUNTIME, REVENUE, IMDB_RATING]);
    }

    #[test]
    fn test_votes_with_separators() {
        let df = df!(
            YEAR => ["2008"],
            RUNTIME => ["152 min"],
            REVENUE => ["$534,858,444"],
            IMDB_RATING => ["9.0"],
            VOTES => ["2,303,232"]
        )
        .unwrap();
        let (df, _) = coerce_numeric_columns(df).unwrap();
        assert_eq!(df.column(VOTES).unwrap().i64().unwrap().get(0), Some(2_303_232));
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let df = frame(&["$133,414,000", "N/A"], &["142 min", "x"], &["1994", "PG"]);
        let (once, _) = coerce_numeric_columns(df).unwrap();
        let (twice, _) = coerce_numeric_columns(once.clone()).unwrap();

        for column in [YEAR, RUNTIME, REVENUE, IMDB_RATING] {
            assert!(
                once.column(column)
                    .unwrap()
                    .as_materialized_series()
                    .equals_missing(twice.column(column).unwrap().as_materialized_series()),
                "column {column} changed on second pass"
            );
        }
    }
}
