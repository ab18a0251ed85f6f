//! The three aggregate views over a filtered record set.
//!
//! All functions are pure and take the records in artifact order. Nulls are
//! excluded from every computation, never treated as zero.

use imdb_processing::MovieRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A title in the top-rated ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMovie {
    pub title: String,
    pub imdb_rating: f64,
    pub year: Option<i32>,
    pub main_genre: Option<String>,
}

impl From<&MovieRecord> for RankedMovie {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            imdb_rating: record.imdb_rating,
            year: record.year,
            main_genre: record.main_genre.clone(),
        }
    }
}

/// Number of titles released in a decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeCount {
    pub decade: i32,
    pub count: usize,
}

/// Mean revenue of the titles of one main genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRevenue {
    pub genre: String,
    pub mean_revenue: f64,
    /// Titles that contributed a revenue value to the mean.
    pub titles_with_revenue: usize,
}

/// Highest rated titles first, at most `limit` of them.
///
/// The sort is stable: titles with equal ratings keep their artifact order.
pub fn top_rated(records: &[&MovieRecord], limit: usize) -> Vec<RankedMovie> {
    let mut sorted: Vec<&MovieRecord> = records.to_vec();
    sorted.sort_by(|a, b| b.imdb_rating.total_cmp(&a.imdb_rating));
    sorted
        .into_iter()
        .take(limit)
        .map(RankedMovie::from)
        .collect()
}

/// Titles per decade, ascending by decade. Titles without a decade are skipped.
pub fn count_by_decade(records: &[&MovieRecord]) -> Vec<DecadeCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for decade in records.iter().filter_map(|r| r.decade) {
        *counts.entry(decade).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect()
}

/// Genres ranked by mean revenue, highest first, at most `limit` of them.
///
/// Titles without revenue are left out of the mean, and a genre with no
/// revenue at all is left out of the ranking. Equal means are ordered by
/// genre name.
pub fn revenue_by_genre(records: &[&MovieRecord], limit: usize) -> Vec<GenreRevenue> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        let (Some(genre), Some(revenue)) = (record.main_genre.as_deref(), record.revenue) else {
            continue;
        };
        let entry = groups.entry(genre).or_insert((0.0, 0));
        entry.0 += revenue;
        entry.1 += 1;
    }

    let mut ranking: Vec<GenreRevenue> = groups
        .into_iter()
        .map(|(genre, (sum, count))| GenreRevenue {
            genre: genre.to_string(),
            mean_revenue: sum / count as f64,
            titles_with_revenue: count,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.mean_revenue
            .total_cmp(&a.mean_revenue)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    ranking.truncate(limit);
    ranking
}
