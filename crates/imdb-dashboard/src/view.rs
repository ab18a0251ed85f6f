//! Everything one render shows, computed from the filtered records.

use crate::aggregates::{self, DecadeCount, GenreRevenue, RankedMovie};
use crate::config::DashboardConfig;
use crate::filter::GenreFilter;
use crate::summary::Findings;
use imdb_processing::MovieRecord;
use serde::{Deserialize, Serialize};

/// The views of a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: GenreFilter,
    pub record_count: usize,
    pub top_rated: Vec<RankedMovie>,
    pub decades: Vec<DecadeCount>,
    pub revenue_by_genre: Vec<GenreRevenue>,
    /// Leading filtered records in artifact order.
    pub preview: Vec<MovieRecord>,
    pub findings: Findings,
}

impl DashboardView {
    /// Recompute every view from `records`, which must already be filtered.
    pub fn compute(filter: GenreFilter, records: &[&MovieRecord], config: &DashboardConfig) -> Self {
        let top_rated = aggregates::top_rated(records, config.top_rated_limit);
        let decades = aggregates::count_by_decade(records);
        let revenue_by_genre = aggregates::revenue_by_genre(records, config.revenue_limit);
        let findings = Findings::from_views(&top_rated, &decades, &revenue_by_genre);

        Self {
            filter,
            record_count: records.len(),
            top_rated,
            decades,
            revenue_by_genre,
            preview: records
                .iter()
                .take(config.preview_rows)
                .map(|r| (*r).clone())
                .collect(),
            findings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
