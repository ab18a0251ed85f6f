//! The single categorical filter: all titles, or one main genre.

use imdb_processing::MovieRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label used for [`GenreFilter::All`] when listing or parsing options.
pub const ALL_LABEL: &str = "All";

/// Which titles the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "genre", rename_all = "snake_case")]
pub enum GenreFilter {
    /// Every title
    #[default]
    All,
    /// Titles whose main genre equals the given one
    Genre(String),
}

impl GenreFilter {
    /// Whether a record passes this filter.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => record.main_genre.as_deref() == Some(genre.as_str()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LABEL),
            Self::Genre(genre) => f.write_str(genre),
        }
    }
}

/// "all" (any case) or an empty selection means every title; anything else
/// is taken as a genre name.
impl FromStr for GenreFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_LABEL) {
            Ok(Self::All)
        } else {
            Ok(Self::Genre(trimmed.to_string()))
        }
    }
}

/// Filter choices offered to the user: `All`, then every distinct main genre
/// in ascending order.
pub fn genre_options(records: &[MovieRecord]) -> Vec<GenreFilter> {
    let genres: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.main_genre.as_deref())
        .collect();

    std::iter::once(GenreFilter::All)
        .chain(genres.into_iter().map(|g| GenreFilter::Genre(g.to_string())))
        .collect()
}
