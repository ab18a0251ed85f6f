//! IMDb Top 1000 cleaning library
//!
//! Turns the raw IMDb Top 1000 CSV into a cleaned artifact with canonical
//! column names, numeric types and derived genre/decade columns, and reads
//! that artifact back as typed [`MovieRecord`]s.
//!
//! # Overview
//!
//! The pipeline runs a fixed sequence of pure stages over a Polars frame:
//!
//! 1. **Rename** raw columns (`Series_Title` -> `title`, ...)
//! 2. **Deduplicate** on `title`, keeping the first occurrence
//! 3. **Drop incomplete** rows without a title or rating
//! 4. **Coerce** runtime, revenue, year and rating leniently; unparsable
//!    values become null and are counted per column
//! 5. **Derive** `main_genre`, `genre_list` and `decade`
//! 6. **Persist** the cleaned CSV
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imdb_processing::{CleaningConfig, Pipeline};
//!
//! let config = CleaningConfig::builder()
//!     .input_path("imdb.csv")
//!     .output_path("imdb_clean.csv")
//!     .build()?;
//!
//! let result = Pipeline::builder().config(config).build()?.run()?;
//! println!("Final records: {}", result.summary.rows_after);
//!
//! // Consumers read the artifact through the shared schema
//! let records = imdb_processing::load_records("imdb_clean.csv".as_ref())?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{ProcessingError, Result as ProcessingResult, ResultExt};
pub use io::{load_records, read_csv_as_text, write_cleaned_csv};
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate,
};
pub use schema::{MovieRecord, records_from_frame};
pub use types::{CleaningResult, CleaningSummary, CoercionReport};
