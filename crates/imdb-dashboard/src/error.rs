//! Error types for the dashboard.
//!
//! Empty aggregates are not errors; they render as the "N/A" sentinel. The
//! only failures are a missing or unreadable cleaned artifact and bad
//! configuration.

use imdb_processing::ProcessingError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// The cleaned artifact could not be loaded.
    #[error(transparent)]
    Processing(#[from] ProcessingError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashboardError {
    /// Get error code for front-end handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Processing(e) => e.error_code(),
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// True when the cleaned artifact does not exist yet.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::Processing(e) if e.is_missing_input())
    }
}

impl Serialize for DashboardError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DashboardError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
