//! Main cleaning pipeline module.
//!
//! This module provides the `Pipeline` struct and builder that chain the
//! cleaning stages in their fixed order.

use crate::cleaner::{
    coerce_numeric_columns, derive_decade, derive_genre_list, derive_main_genre,
    drop_incomplete_rows, remove_duplicate_titles, rename_columns,
};
use crate::config::CleaningConfig;
use crate::error::{ProcessingError, Result, ResultExt};
use crate::io::{read_csv_as_text, write_cleaned_csv};
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::types::{CleaningResult, CleaningSummary};
use chrono::Utc;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use imdb_processing::{CleaningConfig, Pipeline};
///
/// let result = Pipeline::builder()
///     .config(CleaningConfig::builder().input_path("imdb.csv").build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
///
/// println!("Final records: {}", result.summary.rows_after);
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Load the configured input, clean it, and persist the result when
    /// `save_to_disk` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingInput`] if the input file is absent;
    /// nothing is written in that case.
    pub fn run(&self) -> Result<CleaningResult> {
        let start_time = Instant::now();

        let outcome = self.load().and_then(|df| {
            let mut result = self.process_stages(df)?;
            if self.config.save_to_disk {
                self.persist(&result.data)?;
                result.summary.output_path = Some(self.config.output_path.clone());
            }
            Ok(result)
        });

        self.finish(outcome, start_time)
    }

    /// Clean an already loaded frame. Nothing is written to disk.
    pub fn process(&self, df: DataFrame) -> Result<CleaningResult> {
        let start_time = Instant::now();
        let outcome = self.process_stages(df);
        self.finish(outcome, start_time)
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn finish(
        &self,
        outcome: Result<CleaningResult>,
        start_time: Instant,
    ) -> Result<CleaningResult> {
        match outcome {
            Ok(mut result) => {
                result.summary.duration_ms = start_time.elapsed().as_millis() as u64;
                result.summary.generated_at = Utc::now();
                self.report_progress(ProgressUpdate::complete(format!(
                    "Cleaning complete: {} records",
                    result.summary.rows_after
                )));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<DataFrame> {
        let path = &self.config.input_path;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            format!("Loading {}", path.display()),
        ));
        info!("Loading dataset from: {}", path.display());
        read_csv_as_text(path)
    }

    fn persist(&self, df: &DataFrame) -> Result<()> {
        let path = &self.config.output_path;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Persisting,
            format!("Writing {}", path.display()),
        ));
        write_cleaned_csv(df, path)
    }

    fn process_stages(&self, df: DataFrame) -> Result<CleaningResult> {
        let mut summary = CleaningSummary::new();
        summary.rows_before = df.height();
        summary.columns_before = df.width();

        // Step 1: canonical column names
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Renaming,
            "Renaming columns...",
        ));
        info!("Step 1: Renaming columns...");
        let (df, renames) = rename_columns(df).context("Renaming columns")?;
        summary.renamed_columns = renames.renamed;
        for warning in renames.warnings {
            summary.add_warning(warning);
        }

        // Step 2: first occurrence of each title wins
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Deduplicating,
            "Removing duplicate titles...",
        ));
        info!("Step 2: Removing duplicate titles...");
        let (df, duplicates) = remove_duplicate_titles(df)?;
        summary.duplicates_removed = duplicates;
        debug!("Removed {} duplicate rows", duplicates);

        // Step 3: title and rating are mandatory
        self.report_progress(ProgressUpdate::new(
            CleaningStage::DroppingIncomplete,
            "Dropping rows without title or rating...",
        ));
        info!("Step 3: Dropping incomplete rows...");
        let (df, incomplete) = drop_incomplete_rows(df)?;
        summary.incomplete_removed = incomplete;
        debug!("Removed {} incomplete rows", incomplete);

        // Step 4: lenient numeric coercion
        self.report_progress(ProgressUpdate::new(
            CleaningStage::CoercingTypes,
            "Coercing numeric columns...",
        ));
        info!("Step 4: Coercing numeric columns...");
        let (df, coercions) = coerce_numeric_columns(df)?;
        for report in coercions.iter().filter(|r| r.coerced_to_null > 0) {
            summary.add_warning(format!(
                "{} value(s) in '{}' could not be parsed and were set to null",
                report.coerced_to_null, report.column
            ));
        }
        summary.coercions = coercions;

        // Step 5: derived columns
        self.report_progress(ProgressUpdate::new(
            CleaningStage::DerivingFields,
            "Deriving main genre, genre list and decade...",
        ));
        info!("Step 5: Deriving main genre, genre list and decade...");
        let df = derive_main_genre(df)?;
        let df = derive_genre_list(df)?;
        let df = derive_decade(df)?;

        summary.rows_after = df.height();
        summary.columns_after = df.width();
        info!(
            "Cleaning finished: {} -> {} rows ({} duplicates, {} incomplete)",
            summary.rows_before, summary.rows_after, duplicates, incomplete
        );

        Ok(CleaningResult { data: df, summary })
    }
}

/// Builder for creating a [`Pipeline`] instance.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| ProcessingError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
