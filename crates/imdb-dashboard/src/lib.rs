//! Genre-filtered views over the cleaned IMDb Top 1000 artifact.
//!
//! Loads the file written by `imdb-processing`, offers a single filter on
//! `main_genre` and recomputes three views on every render: the top-rated
//! titles, titles per decade and mean revenue per genre, plus a short block of
//! findings.
//!
//! ```rust,ignore
//! use imdb_dashboard::{Dashboard, DashboardConfig, GenreFilter, render};
//!
//! let mut dashboard = Dashboard::load(DashboardConfig::default())?;
//! dashboard.select(GenreFilter::Genre("Drama".into()));
//! let view = dashboard.render();
//! println!("{}", render::render_text(&view, dashboard.config().chart_width));
//! ```

pub mod aggregates;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod render;
pub mod summary;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregates::{DecadeCount, GenreRevenue, RankedMovie};
pub use config::{ConfigValidationError, DashboardConfig, DashboardConfigBuilder};
pub use dashboard::{Dashboard, DashboardState};
pub use error::{DashboardError, Result};
pub use filter::{GenreFilter, genre_options};
pub use summary::{Findings, NOT_AVAILABLE};
pub use view::DashboardView;
