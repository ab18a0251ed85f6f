//! Configuration for the dashboard views.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the dashboard.
///
/// Use [`DashboardConfig::builder()`] to create a new configuration
/// with fluent API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Cleaned artifact to read.
    /// Default: "imdb_clean.csv"
    pub input_path: PathBuf,

    /// Number of titles in the top-rated ranking.
    /// Default: 10
    pub top_rated_limit: usize,

    /// Number of genres in the mean-revenue ranking.
    /// Default: 10
    pub revenue_limit: usize,

    /// Number of filtered records shown in the preview table.
    /// Default: 20
    pub preview_rows: usize,

    /// Width in characters of the longest bar in text charts.
    /// Default: 40
    pub chart_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(imdb_processing::config::DEFAULT_OUTPUT_PATH),
            top_rated_limit: 10,
            revenue_limit: 10,
            preview_rows: 20,
            chart_width: 40,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("top_rated_limit", self.top_rated_limit),
            ("revenue_limit", self.revenue_limit),
            ("chart_width", self.chart_width),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroLimit(field.to_string()));
            }
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroLimit(String),

    #[error("Invalid path for '{0}': must not be empty")]
    EmptyPath(String),
}

/// Builder for [`DashboardConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    input_path: Option<PathBuf>,
    top_rated_limit: Option<usize>,
    revenue_limit: Option<usize>,
    preview_rows: Option<usize>,
    chart_width: Option<usize>,
}

impl DashboardConfigBuilder {
    /// Set the cleaned artifact to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set how many titles the top-rated ranking shows.
    pub fn top_rated_limit(mut self, n: usize) -> Self {
        self.top_rated_limit = Some(n);
        self
    }

    /// Set how many genres the revenue ranking shows.
    pub fn revenue_limit(mut self, n: usize) -> Self {
        self.revenue_limit = Some(n);
        self
    }

    /// Set how many rows the preview table shows. Zero hides the preview.
    pub fn preview_rows(mut self, n: usize) -> Self {
        self.preview_rows = Some(n);
        self
    }

    /// Set the width of the longest chart bar.
    pub fn chart_width(mut self, width: usize) -> Self {
        self.chart_width = Some(width);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<DashboardConfig, ConfigValidationError> {
        let defaults = DashboardConfig::default();
        let config = DashboardConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            top_rated_limit: self.top_rated_limit.unwrap_or(defaults.top_rated_limit),
            revenue_limit: self.revenue_limit.unwrap_or(defaults.revenue_limit),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
        };

        config.validate()?;
        Ok(config)
    }
}
