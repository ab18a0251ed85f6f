//! Textual findings derived from the aggregate views.

use crate::aggregates::{DecadeCount, GenreRevenue, RankedMovie};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a finding that has no data behind it.
pub const NOT_AVAILABLE: &str = "N/A";

/// Headline facts about the filtered set. Each part is computed on its own,
/// so an empty revenue ranking does not hide the best-rated title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Findings {
    pub best_rated: Option<RankedMovie>,
    pub busiest_decade: Option<i32>,
    pub top_revenue_genre: Option<String>,
}

impl Findings {
    /// Derive findings from views that are already ordered the way the
    /// aggregate functions return them.
    pub fn from_views(
        top_rated: &[RankedMovie],
        decades: &[DecadeCount],
        revenue: &[GenreRevenue],
    ) -> Self {
        Self {
            best_rated: top_rated.first().cloned(),
            busiest_decade: busiest_decade(decades),
            top_revenue_genre: revenue.first().map(|g| g.genre.clone()),
        }
    }

    pub fn best_rated_line(&self) -> String {
        match &self.best_rated {
            Some(movie) => format!(
                "Highest rated: {} ({:.1} IMDb)",
                movie.title, movie.imdb_rating
            ),
            None => format!("Highest rated: {NOT_AVAILABLE}"),
        }
    }

    pub fn busiest_decade_line(&self) -> String {
        let decade = self
            .busiest_decade
            .map(|d| d.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("Decade with most titles: {decade}")
    }

    pub fn top_revenue_genre_line(&self) -> String {
        let genre = self.top_revenue_genre.as_deref().unwrap_or(NOT_AVAILABLE);
        format!("Genre with highest mean revenue: {genre}")
    }

    pub fn lines(&self) -> [String; 3] {
        [
            self.best_rated_line(),
            self.busiest_decade_line(),
            self.top_revenue_genre_line(),
        ]
    }
}

impl fmt::Display for Findings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [best, decade, genre] = self.lines();
        writeln!(f, "{best}")?;
        writeln!(f, "{decade}")?;
        write!(f, "{genre}")
    }
}

/// Decade with the highest count. `decades` is ascending, and only a strictly
/// higher count replaces the current pick, so the earliest decade wins a tie.
fn busiest_decade(decades: &[DecadeCount]) -> Option<i32> {
    let mut best: Option<DecadeCount> = None;
    for entry in decades {
        if best.is_none_or(|b| entry.count > b.count) {
            best = Some(*entry);
        }
    }
    best.map(|b| b.decade)
}
