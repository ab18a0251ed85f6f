//! Canonical record schema shared by the cleaning pipeline and its consumers.
//!
//! The cleaned CSV artifact is the only contract between the pipeline and the
//! dashboard. Both sides go through the column names and the [`MovieRecord`]
//! type declared here, so a renamed or retyped column fails loudly in
//! [`records_from_frame`] instead of silently reading as null.

use crate::error::{ProcessingError, Result};
use crate::utils::{column_as_text, parse_float, parse_i32, parse_integer, text_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

pub const TITLE: &str = "title";
pub const YEAR: &str = "year";
pub const RUNTIME: &str = "runtime";
pub const GENRE: &str = "genre";
pub const IMDB_RATING: &str = "imdb_rating";
pub const METASCORE: &str = "metascore";
pub const VOTES: &str = "votes";
pub const REVENUE: &str = "revenue";
pub const CERTIFICATE: &str = "certificate";
pub const MAIN_GENRE: &str = "main_genre";
pub const GENRE_LIST: &str = "genre_list";
pub const DECADE: &str = "decade";

/// Raw column names and the canonical names they are renamed to.
pub const RENAME_MAP: [(&str, &str); 9] = [
    ("Series_Title", TITLE),
    ("Released_Year", YEAR),
    ("Runtime", RUNTIME),
    ("Genre", GENRE),
    ("IMDB_Rating", IMDB_RATING),
    ("Meta_score", METASCORE),
    ("No_of_Votes", VOTES),
    ("Gross", REVENUE),
    ("Certificate", CERTIFICATE),
];

/// Columns the pipeline cannot run without (after renaming).
pub const REQUIRED_RAW_COLUMNS: [&str; 6] = [TITLE, YEAR, RUNTIME, GENRE, IMDB_RATING, REVENUE];

/// Columns the raw file may lack. They are added as all-null columns so the
/// artifact always carries every column of [`CLEANED_COLUMNS`].
pub const OPTIONAL_RAW_COLUMNS: [&str; 3] = [METASCORE, VOTES, CERTIFICATE];

/// Every column of the cleaned artifact that maps onto [`MovieRecord`].
pub const CLEANED_COLUMNS: [&str; 12] = [
    TITLE,
    YEAR,
    RUNTIME,
    GENRE,
    MAIN_GENRE,
    GENRE_LIST,
    IMDB_RATING,
    METASCORE,
    VOTES,
    REVENUE,
    CERTIFICATE,
    DECADE,
];

/// One title of the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: Option<i32>,
    /// Minutes.
    pub runtime: Option<i32>,
    /// Comma-separated genre labels as found in the raw data.
    pub genre_raw: Option<String>,
    pub main_genre: Option<String>,
    pub genre_list: Vec<String>,
    pub imdb_rating: f64,
    pub metascore: Option<f64>,
    pub votes: Option<i64>,
    pub revenue: Option<f64>,
    pub certificate: Option<String>,
    pub decade: Option<i32>,
}

/// Encode a genre list the way it is stored in the artifact.
pub fn encode_genre_list(genres: &[String]) -> Result<String> {
    Ok(serde_json::to_string(genres)?)
}

/// Decode the artifact representation of a genre list.
pub fn decode_genre_list(encoded: &str) -> Option<Vec<String>> {
    serde_json::from_str(encoded).ok()
}

/// A single column of the artifact, read as text.
struct TextColumn {
    name: &'static str,
    values: Vec<Option<String>>,
}

impl TextColumn {
    fn load(df: &DataFrame, name: &'static str) -> Result<Self> {
        if !df.get_column_names().iter().any(|c| c.as_str() == name) {
            return Err(ProcessingError::ColumnNotFound(name.to_string()));
        }
        let series = column_as_text(df, name)?;
        Ok(Self {
            name,
            values: text_values(&series)?,
        })
    }

    /// Value at `row` as written. Blank and whitespace-only cells are null.
    fn text(&self, row: usize) -> Option<&str> {
        self.values[row]
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    fn required_text(&self, row: usize) -> Result<String> {
        self.text(row)
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(row, ""))
    }

    fn parsed<T>(&self, row: usize, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
        match self.text(row) {
            None => Ok(None),
            Some(raw) => parse(raw).map(Some).ok_or_else(|| self.mismatch(row, raw)),
        }
    }

    fn mismatch(&self, row: usize, value: &str) -> ProcessingError {
        ProcessingError::SchemaMismatch {
            column: self.name.to_string(),
            row,
            value: value.to_string(),
        }
    }
}

/// Convert a cleaned frame into typed records.
///
/// Every column of [`CLEANED_COLUMNS`] must be present. Values are read
/// strictly: a cell that does not parse as the declared type is a
/// [`ProcessingError::SchemaMismatch`], since the artifact was produced by
/// the pipeline and anything unreadable means the contract was broken.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<MovieRecord>> {
    let title = TextColumn::load(df, TITLE)?;
    let year = TextColumn::load(df, YEAR)?;
    let runtime = TextColumn::load(df, RUNTIME)?;
    let genre = TextColumn::load(df, GENRE)?;
    let main_genre = TextColumn::load(df, MAIN_GENRE)?;
    let genre_list = TextColumn::load(df, GENRE_LIST)?;
    let imdb_rating = TextColumn::load(df, IMDB_RATING)?;
    let metascore = TextColumn::load(df, METASCORE)?;
    let votes = TextColumn::load(df, VOTES)?;
    let revenue = TextColumn::load(df, REVENUE)?;
    let certificate = TextColumn::load(df, CERTIFICATE)?;
    let decade = TextColumn::load(df, DECADE)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let rating = imdb_rating
            .parsed(row, parse_float)?
            .ok_or_else(|| imdb_rating.mismatch(row, ""))?;

        records.push(MovieRecord {
            title: title.required_text(row)?,
            year: year.parsed(row, parse_i32)?,
            runtime: runtime.parsed(row, parse_i32)?,
            genre_raw: genre.text(row).map(str::to_string),
            main_genre: main_genre.text(row).map(str::to_string),
            genre_list: genre_list.parsed(row, decode_genre_list)?.unwrap_or_default(),
            imdb_rating: rating,
            metascore: metascore.parsed(row, parse_float)?,
            votes: votes.parsed(row, parse_integer)?,
            revenue: revenue.parsed(row, parse_float)?,
            certificate: certificate.text(row).map(str::to_string),
            decade: decade.parsed(row, parse_i32)?,
        });
    }

    Ok(records)
}
