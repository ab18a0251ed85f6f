//! Reading and writing the CSV files at both ends of the pipeline.

use crate::error::{ProcessingError, Result, ResultExt};
use crate::schema::{MovieRecord, records_from_frame};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load a CSV file with every column read as text.
///
/// Schema inference is off. Numeric coercion happens in the pipeline, and
/// `Released_Year` may hold values such as "PG".
pub fn read_csv_as_text(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ProcessingError::MissingInput(path.to_path_buf()));
    }

    debug!("Reading {} with all columns as text", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Parsing {}", path.display()))?;

    debug!("Loaded {:?} (rows, columns)", df.shape());
    Ok(df)
}

/// Write a cleaned frame with a header row and no index column.
///
/// The data goes to a sibling `.tmp` file that is renamed into place once
/// complete. A failed write leaves no artifact behind.
pub fn write_cleaned_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temporary_path(path);
    let mut out = df.clone();
    let written = File::create(&tmp_path)
        .map_err(ProcessingError::from)
        .and_then(|mut file| {
            CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(b',')
                .with_quote_char(b'"')
                .finish(&mut out)
                .map_err(ProcessingError::from)
        });

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.with_context(format!("Writing {}", path.display())));
    }

    fs::rename(&tmp_path, path)?;
    info!("Cleaned dataset saved: {}", path.display());
    Ok(())
}

/// Load the cleaned artifact as typed records.
pub fn load_records(path: &Path) -> Result<Vec<MovieRecord>> {
    let df = read_csv_as_text(path)?;
    records_from_frame(&df).context(format!("Reading records from {}", path.display()))
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
