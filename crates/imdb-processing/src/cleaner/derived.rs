//! Derived columns: main genre, genre list and decade bucket.

use crate::error::Result;
use crate::schema::{DECADE, GENRE, GENRE_LIST, MAIN_GENRE, YEAR, encode_genre_list};
use crate::utils::{column_as_text, is_blank, text_values};
use polars::prelude::*;

/// Split a comma-separated genre string into trimmed labels, in order.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',').map(|g| g.trim().to_string()).collect()
}

/// Add `main_genre`: the first label of `genre`, trimmed.
pub fn derive_main_genre(df: DataFrame) -> Result<DataFrame> {
    let mut df = df;
    let genres = text_values(&column_as_text(&df, GENRE)?)?;

    let main: Vec<Option<String>> = genres
        .iter()
        .map(|g| {
            if is_blank(g.as_deref()) {
                return None;
            }
            g.as_deref()
                .and_then(|raw| raw.split(',').next())
                .map(|first| first.trim().to_string())
        })
        .collect();

    df.with_column(Series::new(MAIN_GENRE.into(), main))?;
    Ok(df)
}

/// Add `genre_list`: every label of `genre`, trimmed, stored as a JSON array.
pub fn derive_genre_list(df: DataFrame) -> Result<DataFrame> {
    let mut df = df;
    let genres = text_values(&column_as_text(&df, GENRE)?)?;

    let lists = genres
        .iter()
        .map(|g| match g.as_deref() {
            Some(raw) if !raw.trim().is_empty() => encode_genre_list(&split_genres(raw)).map(Some),
            _ => Ok(None),
        })
        .collect::<Result<Vec<Option<String>>>>()?;

    df.with_column(Series::new(GENRE_LIST.into(), lists))?;
    Ok(df)
}

/// Bucket a year into its decade (1994 -> 1990). `None` when the decade
/// does not fit in `i32`.
pub fn decade_of(year: i32) -> Option<i32> {
    year.div_euclid(10).checked_mul(10)
}

/// Add `decade` from the coerced `year` column. Null years stay null.
pub fn derive_decade(df: DataFrame) -> Result<DataFrame> {
    let mut df = df;
    let years = df
        .column(YEAR)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;

    let decades: Vec<Option<i32>> = years
        .i32()?
        .into_iter()
        .map(|y| y.and_then(decade_of))
        .collect();

    df.with_column(Series::new(DECADE.into(), decades))?;
    Ok(df)
}
