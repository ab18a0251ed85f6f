use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output of a pipeline run: the cleaned frame and what happened to it.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}

/// Per-column diagnostic for lenient numeric coercion.
///
/// Coercion never fails; values that do not parse become null. This report
/// is the only place where that loss is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionReport {
    pub column: String,
    /// Cells that were already null or blank before coercion.
    pub null_before: usize,
    /// Cells that held a value which failed to parse.
    pub coerced_to_null: usize,
    pub null_after: usize,
}

impl CoercionReport {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            null_before: 0,
            coerced_to_null: 0,
            null_after: 0,
        }
    }
}

/// Summary of a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows read.
    pub rows_before: usize,
    /// Number of rows in the cleaned artifact.
    pub rows_after: usize,
    /// Rows dropped because their title was already seen.
    pub duplicates_removed: usize,
    /// Rows dropped for a missing title or rating.
    pub incomplete_removed: usize,

    pub columns_before: usize,
    pub columns_after: usize,

    /// Columns renamed to their canonical names, as `(from, to)`.
    pub renamed_columns: Vec<(String, String)>,

    /// Lenient coercion diagnostics, one per coerced column.
    pub coercions: Vec<CoercionReport>,

    /// Where the cleaned artifact was written, if it was.
    pub output_path: Option<PathBuf>,

    /// Warnings and notes generated during cleaning.
    pub warnings: Vec<String>,
}

impl Default for CleaningSummary {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
            duration_ms: 0,
            rows_before: 0,
            rows_after: 0,
            duplicates_removed: 0,
            incomplete_removed: 0,
            columns_before: 0,
            columns_after: 0,
            renamed_columns: Vec::new(),
            coercions: Vec::new(),
            output_path: None,
            warnings: Vec::new(),
        }
    }
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the summary.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Total number of rows removed.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Calculate the percentage of rows removed.
    pub fn rows_removed_percentage(&self) -> f32 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed() as f32 / self.rows_before as f32) * 100.0
        }
    }

    /// Total number of values that became null during coercion.
    pub fn total_coerced_to_null(&self) -> usize {
        self.coercions.iter().map(|c| c.coerced_to_null).sum()
    }

    /// Coercion report for a single column.
    pub fn coercion(&self, column: &str) -> Option<&CoercionReport> {
        self.coercions.iter().find(|c| c.column == column)
    }
}
