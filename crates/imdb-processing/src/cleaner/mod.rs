//! Cleaning stages for the raw IMDb dataset.
//!
//! Every stage takes a frame by value and returns a new one, so the pipeline
//! is a plain sequence of calls and each step can be tested on its own:
//! - Renaming raw columns to canonical names
//! - Removing duplicate titles
//! - Dropping rows without a title or rating
//! - Lenient numeric coercion
//! - Deriving genre and decade columns

mod converters;
mod derived;

pub use converters::coerce_numeric_columns;
pub use derived::{derive_decade, derive_genre_list, derive_main_genre};

use crate::error::{ProcessingError, Result};
use crate::schema::{IMDB_RATING, OPTIONAL_RAW_COLUMNS, RENAME_MAP, REQUIRED_RAW_COLUMNS, TITLE};
use crate::utils::{column_as_text, is_blank, parse_float, text_values};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Outcome of [`rename_columns`].
#[derive(Debug, Default)]
pub struct RenameOutcome {
    /// Columns actually renamed, as `(from, to)`.
    pub renamed: Vec<(String, String)>,
    /// Optional columns absent from the input, added as all-null.
    pub added: Vec<String>,
    pub warnings: Vec<String>,
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Rename raw columns to their canonical names.
///
/// Absent source columns are skipped, which lets the pipeline run on its own
/// output. Columns outside the mapping are kept as they are. Fails with
/// [`ProcessingError::ColumnNotFound`] when a required column is still
/// missing afterwards; a missing optional column is added as all-null.
pub fn rename_columns(df: DataFrame) -> Result<(DataFrame, RenameOutcome)> {
    let mut df = df;
    let mut outcome = RenameOutcome::default();

    for (source, canonical) in RENAME_MAP {
        if !has_column(&df, source) {
            continue;
        }
        if has_column(&df, canonical) {
            let message = format!(
                "Both '{}' and '{}' present; keeping '{}' as is",
                source, canonical, source
            );
            warn!("{}", message);
            outcome.warnings.push(message);
            continue;
        }
        df.rename(source, canonical.into())?;
        outcome
            .renamed
            .push((source.to_string(), canonical.to_string()));
    }

    if let Some(missing) = REQUIRED_RAW_COLUMNS
        .iter()
        .find(|name| !has_column(&df, name))
    {
        return Err(ProcessingError::ColumnNotFound(missing.to_string()));
    }

    for name in OPTIONAL_RAW_COLUMNS {
        if has_column(&df, name) {
            continue;
        }
        let message = format!("Column '{}' not in input; written as empty", name);
        warn!("{}", message);
        outcome.warnings.push(message);
        df.with_column(Series::full_null(name.into(), df.height(), &DataType::String))?;
        outcome.added.push(name.to_string());
    }

    debug!("Renamed {} columns", outcome.renamed.len());
    Ok((df, outcome))
}

/// Keep the first row for every title, in input order.
///
/// Returns the filtered frame and the number of rows removed.
pub fn remove_duplicate_titles(df: DataFrame) -> Result<(DataFrame, usize)> {
    let titles = text_values(&column_as_text(&df, TITLE)?)?;
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(titles.len());
    let keep: Vec<bool> = titles.into_iter().map(|t| seen.insert(t)).collect();

    filter_rows(df, &keep)
}

/// Drop rows without a title or without a usable rating.
///
/// A rating that is present but would not survive numeric coercion counts as
/// missing, so every surviving row has a numeric rating.
pub fn drop_incomplete_rows(df: DataFrame) -> Result<(DataFrame, usize)> {
    let titles = text_values(&column_as_text(&df, TITLE)?)?;
    let ratings = text_values(&column_as_text(&df, IMDB_RATING)?)?;

    let keep: Vec<bool> = titles
        .iter()
        .zip(&ratings)
        .map(|(title, rating)| {
            !is_blank(title.as_deref()) && rating.as_deref().and_then(parse_float).is_some()
        })
        .collect();

    filter_rows(df, &keep)
}

fn filter_rows(df: DataFrame, keep: &[bool]) -> Result<(DataFrame, usize)> {
    let removed = keep.iter().filter(|k| !**k).count();
    if removed == 0 {
        return Ok((df, 0));
    }

    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok((df.filter(&mask)?, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CERTIFICATE, GENRE, METASCORE, REVENUE, RUNTIME, VOTES, YEAR};

    fn raw_frame() -> DataFrame {
        df!(
            "Series_Title" => [Some("Inception"), Some("Inception"), None, Some("Up")],
            "Released_Year" => ["2010", "2010", "1999", "2009"],
            "Runtime" => ["148 min", "148 min", "90 min", "96 min"],
            "Genre" => ["Action, Adventure, Sci-Fi", "Action", "Drama", "Animation"],
            "IMDB_Rating" => [Some("8.8"), None, Some("7.0"), Some("8.2")],
            "Gross" => ["$292,576,195", "", "", "$293,004,164"],
            "Director" => ["Christopher Nolan", "Christopher Nolan", "Nobody", "Pete Docter"]
        )
        .unwrap()
    }

    #[test]
    fn test_rename_columns_maps_and_keeps_passthrough() {
        let (df, outcome) = rename_columns(raw_frame()).unwrap();

        for name in [TITLE, YEAR, RUNTIME, GENRE, IMDB_RATING, REVENUE] {
            assert!(has_column(&df, name), "missing {name}");
        }
        assert!(has_column(&df, "Director"));
        assert!(!has_column(&df, "Series_Title"));
        assert_eq!(outcome.renamed.len(), 6);
        assert_eq!(outcome.added, vec![METASCORE, VOTES, CERTIFICATE]);
        assert_eq!(outcome.warnings.len(), 3);
    }

    #[test]
    fn test_rename_columns_keeps_present_optional_columns() {
        let df = raw_frame()
            .hstack(&[
                Column::new("Meta_score".into(), ["74", "74", "", "88"]),
                Column::new("No_of_Votes".into(), ["1", "1", "1", "1"]),
                Column::new("Certificate".into(), ["UA", "UA", "", "U"]),
            ])
            .unwrap();
        let (df, outcome) = rename_columns(df).unwrap();

        assert!(outcome.added.is_empty());
        assert!(outcome.warnings.is_empty());
        let certificates = text_values(&column_as_text(&df, CERTIFICATE).unwrap()).unwrap();
        assert_eq!(certificates[0].as_deref(), Some("UA"));
    }

    #[test]
    fn test_missing_optional_columns_are_all_null() {
        let (df, _) = rename_columns(raw_frame()).unwrap();
        for name in [METASCORE, VOTES, CERTIFICATE] {
            assert_eq!(df.column(name).unwrap().null_count(), df.height(), "{name}");
        }
    }

    #[test]
    fn test_titles_differing_in_whitespace_are_distinct() {
        let df = df!(
            TITLE => ["Up", "Up "],
            IMDB_RATING => ["8.2", "8.2"]
        )
        .unwrap();
        let (df, removed) = remove_duplicate_titles(df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_rename_columns_is_noop_on_canonical_names() {
        let (df, _) = rename_columns(raw_frame()).unwrap();
        let (again, outcome) = rename_columns(df.clone()).unwrap();

        assert!(outcome.renamed.is_empty());
        assert_eq!(again.get_column_names(), df.get_column_names());
    }

    #[test]
    fn test_rename_columns_missing_required() {
        let df = raw_frame().drop("Gross").unwrap();
        let err = rename_columns(df).unwrap_err();
        assert!(matches!(err, ProcessingError::ColumnNotFound(c) if c == REVENUE));
    }

    #[test]
    fn test_remove_duplicate_titles_keeps_first() {
        let (df, _) = rename_columns(raw_frame()).unwrap();
        let (df, removed) = remove_duplicate_titles(df).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(df.height(), 3);
        let ratings = text_values(&column_as_text(&df, IMDB_RATING).unwrap()).unwrap();
        assert_eq!(ratings[0].as_deref(), Some("8.8"));
    }

    #[test]
    fn test_drop_incomplete_rows() {
        let (df, _) = rename_columns(raw_frame()).unwrap();
        let (df, removed) = drop_incomplete_rows(df).unwrap();

        // Second Inception has no rating, third row has no title
        assert_eq!(removed, 2);
        let titles = text_values(&column_as_text(&df, TITLE).unwrap()).unwrap();
        assert_eq!(
            titles,
            vec![Some("Inception".to_string()), Some("Up".to_string())]
        );
    }

    #[test]
    fn test_drop_incomplete_rows_unparsable_rating() {
        let df = df!(
            TITLE => ["Good", "Bad"],
            IMDB_RATING => ["8.1", "not rated"]
        )
        .unwrap();
        let (df, removed) = drop_incomplete_rows(df).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 1);
    }
}
