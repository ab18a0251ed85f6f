//! The dashboard: loaded records plus the current filter selection.

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::filter::{GenreFilter, genre_options};
use crate::view::DashboardView;
use imdb_processing::{MovieRecord, load_records};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Selection state. Every render is computed from scratch for the current
/// state; nothing else is carried between renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "genre", rename_all = "snake_case")]
pub enum DashboardState {
    #[default]
    Unfiltered,
    Filtered(String),
}

impl From<GenreFilter> for DashboardState {
    fn from(filter: GenreFilter) -> Self {
        match filter {
            GenreFilter::All => Self::Unfiltered,
            GenreFilter::Genre(genre) => Self::Filtered(genre),
        }
    }
}

impl From<&DashboardState> for GenreFilter {
    fn from(state: &DashboardState) -> Self {
        match state {
            DashboardState::Unfiltered => GenreFilter::All,
            DashboardState::Filtered(genre) => GenreFilter::Genre(genre.clone()),
        }
    }
}

/// Records of the cleaned artifact and the active genre selection.
///
/// # Example
///
/// ```rust,ignore
/// let mut dashboard = Dashboard::load(DashboardConfig::default())?;
/// dashboard.select(GenreFilter::Genre("Drama".into()));
/// println!("{}", render::render_text(&dashboard.render(), 40));
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<MovieRecord>,
    state: DashboardState,
    config: DashboardConfig,
}

impl Dashboard {
    /// Dashboard over records that are already in memory.
    pub fn new(records: Vec<MovieRecord>, config: DashboardConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self::with_records(records, config))
    }

    /// Read the cleaned artifact named by the configuration. The
    /// configuration is checked before the file is touched.
    pub fn load(config: DashboardConfig) -> Result<Self> {
        validate(&config)?;

        info!("Loading cleaned artifact from {:?}", config.input_path);
        let records = load_records(&config.input_path)?;
        info!("Loaded {} records", records.len());

        Ok(Self::with_records(records, config))
    }

    fn with_records(records: Vec<MovieRecord>, config: DashboardConfig) -> Self {
        Self {
            records,
            state: DashboardState::Unfiltered,
            config,
        }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The active filter.
    pub fn filter(&self) -> GenreFilter {
        GenreFilter::from(&self.state)
    }

    /// Filter choices for the loaded records.
    pub fn options(&self) -> Vec<GenreFilter> {
        genre_options(&self.records)
    }

    /// Switch to `filter`. Selecting the active filter again changes nothing.
    pub fn select(&mut self, filter: GenreFilter) {
        let next = DashboardState::from(filter);
        if next != self.state {
            debug!("Selection changed: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Records matching the active filter, in artifact order.
    pub fn filtered(&self) -> Vec<&MovieRecord> {
        let filter = self.filter();
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Recompute every view for the active filter.
    pub fn render(&self) -> DashboardView {
        let filtered = self.filtered();
        debug!(
            "Rendering {} of {} records for filter '{}'",
            filtered.len(),
            self.records.len(),
            self.filter()
        );
        DashboardView::compute(self.filter(), &filtered, &self.config)
    }
}

fn validate(config: &DashboardConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| DashboardError::InvalidConfig(e.to_string()))
}
