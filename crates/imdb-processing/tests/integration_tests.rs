//! Integration tests for the cleaning pipeline.
//!
//! These tests run the pipeline end to end on a small IMDb-shaped fixture and
//! read the cleaned artifact back through the typed schema.

use imdb_processing::schema::{DECADE, IMDB_RATING, METASCORE, REVENUE, RUNTIME, VOTES, YEAR};
use imdb_processing::{
    CleaningConfig, CleaningResult, MovieRecord, Pipeline, load_records, read_csv_as_text,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_pipeline(input: &Path, output: &Path) -> CleaningResult {
    let config = CleaningConfig::builder()
        .input_path(input)
        .output_path(output)
        .build()
        .expect("valid config");

    Pipeline::builder()
        .config(config)
        .build()
        .expect("pipeline builds")
        .run()
        .expect("pipeline runs")
}

fn clean_sample() -> (TempDir, PathBuf, CleaningResult) {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("imdb_clean.csv");
    let result = run_pipeline(&fixtures_path().join("imdb_sample.csv"), &output);
    (dir, output, result)
}

fn clean_raw_csv(contents: &str) -> (TempDir, PathBuf, CleaningResult) {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("imdb.csv");
    std::fs::write(&input, contents).expect("write raw csv");
    let output = dir.path().join("imdb_clean.csv");
    let result = run_pipeline(&input, &output);
    (dir, output, result)
}

fn record<'a>(records: &'a [MovieRecord], title: &str) -> &'a MovieRecord {
    records
        .iter()
        .find(|r| r.title == title)
        .unwrap_or_else(|| panic!("no record titled {title}"))
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_clean_sample_counts() {
    let (_dir, output, result) = clean_sample();
    let summary = &result.summary;

    assert_eq!(summary.rows_before, 11);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.incomplete_removed, 2);
    assert_eq!(summary.rows_after, 8);
    assert_eq!(summary.output_path.as_deref(), Some(output.as_path()));
    assert!(output.exists());
}

#[test]
fn test_cleaned_records_hold_invariants() {
    let (_dir, output, _) = clean_sample();
    let records = load_records(&output).expect("artifact readable");
    assert_eq!(records.len(), 8);

    let mut titles = HashSet::new();
    for r in &records {
        assert!(!r.title.is_empty());
        assert!(titles.insert(r.title.clone()), "duplicate title {}", r.title);
        assert!(r.imdb_rating.is_finite());

        match (r.year, r.decade) {
            (Some(year), Some(decade)) => {
                assert_eq!(decade, year.div_euclid(10) * 10);
                assert_eq!(decade % 10, 0);
            }
            (None, decade) => assert_eq!(decade, None),
            (Some(year), None) => panic!("year {year} without decade"),
        }

        if let Some(first) = r.genre_list.first() {
            assert_eq!(r.main_genre.as_ref(), Some(first));
        }
    }
}

#[test]
fn test_duplicate_inception_keeps_rated_row() {
    let (_dir, output, _) = clean_sample();
    let records = load_records(&output).unwrap();

    let inceptions: Vec<_> = records.iter().filter(|r| r.title == "Inception").collect();
    assert_eq!(inceptions.len(), 1);
    assert_eq!(inceptions[0].imdb_rating, 8.8);
}

#[test]
fn test_lenient_coercion_on_fixture() {
    let (_dir, output, result) = clean_sample();
    let records = load_records(&output).unwrap();

    let shawshank = record(&records, "The Shawshank Redemption");
    assert_eq!(shawshank.runtime, Some(142));
    assert_eq!(shawshank.revenue, Some(28_341_469.0));
    assert_eq!(shawshank.votes, Some(2_343_110));
    assert_eq!(shawshank.metascore, Some(80.0));
    assert_eq!(shawshank.decade, Some(1990));

    // "PG" in the year column
    let apollo = record(&records, "Apollo 13");
    assert_eq!(apollo.year, None);
    assert_eq!(apollo.decade, None);

    // "N/A" gross and empty certificate
    let mandariinid = record(&records, "Mandariinid");
    assert_eq!(mandariinid.revenue, None);
    assert_eq!(mandariinid.certificate, None);

    let summary = &result.summary;
    assert_eq!(summary.coercion(YEAR).unwrap().coerced_to_null, 1);
    assert_eq!(summary.coercion(REVENUE).unwrap().coerced_to_null, 1);
    assert_eq!(summary.coercion(RUNTIME).unwrap().coerced_to_null, 0);
    assert_eq!(summary.total_coerced_to_null(), 2);
}

#[test]
fn test_genres_derived_from_fixture() {
    let (_dir, output, _) = clean_sample();
    let records = load_records(&output).unwrap();

    let godfather = record(&records, "The Godfather");
    assert_eq!(godfather.genre_raw.as_deref(), Some("Crime, Drama"));
    assert_eq!(godfather.main_genre.as_deref(), Some("Crime"));
    assert_eq!(godfather.genre_list, vec!["Crime", "Drama"]);
}

#[test]
fn test_passthrough_columns_preserved() {
    let (_dir, output, _) = clean_sample();
    let df = read_csv_as_text(&output).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();

    for passthrough in ["Poster_Link", "Overview", "Director", "Star1"] {
        assert!(names.contains(&passthrough.to_string()), "{passthrough} dropped");
    }
    assert!(!names.contains(&"Series_Title".to_string()));
    assert_eq!(
        &names[names.len() - 3..],
        &["main_genre".to_string(), "genre_list".to_string(), "decade".to_string()]
    );
}

#[test]
fn test_rerun_on_own_output_keeps_numeric_columns() {
    let (dir, first, _) = clean_sample();
    let second = dir.path().join("imdb_clean_again.csv");
    let rerun = run_pipeline(&first, &second);

    assert_eq!(rerun.summary.rows_after, 8);
    assert!(rerun.summary.renamed_columns.is_empty());
    assert_eq!(rerun.summary.total_coerced_to_null(), 0);

    let a = read_csv_as_text(&first).unwrap();
    let b = read_csv_as_text(&second).unwrap();
    for column in [YEAR, RUNTIME, REVENUE, IMDB_RATING, METASCORE, VOTES, DECADE] {
        let left = a.column(column).unwrap().as_materialized_series();
        let right = b.column(column).unwrap().as_materialized_series();
        assert!(left.equals_missing(right), "column {column} changed on rerun");
    }
}

#[test]
fn test_input_without_optional_columns_loads_back() {
    let (_dir, output, result) = clean_raw_csv(
        "Series_Title,Released_Year,Runtime,Genre,IMDB_Rating,Gross\n\
         Up,2009,96 min,\"Animation, Adventure, Comedy\",8.2,\"293,004,164\"\n\
         Heat,1995,170 min,\"Action, Crime, Drama\",8.2,\"67,436,818\"\n",
    );
    assert_eq!(result.summary.warnings.len(), 3);

    let records = load_records(&output).expect("artifact readable");
    assert_eq!(records.len(), 2);
    for r in &records {
        assert_eq!(r.metascore, None);
        assert_eq!(r.votes, None);
        assert_eq!(r.certificate, None);
    }
    assert_eq!(records[0].main_genre.as_deref(), Some("Animation"));
}

#[test]
fn test_titles_differing_in_whitespace_stay_distinct() {
    let (_dir, output, result) = clean_raw_csv(
        "Series_Title,Released_Year,Runtime,Genre,IMDB_Rating,Gross\n\
         Up,2009,96 min,Animation,8.2,\n\
         \"Up \",2009,96 min,Animation,8.2,\n",
    );
    assert_eq!(result.summary.duplicates_removed, 0);

    let records = load_records(&output).unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Up", "Up "]);
    let unique: HashSet<&str> = titles.iter().copied().collect();
    assert_eq!(unique.len(), records.len());
}

#[test]
fn test_out_of_range_year_has_no_decade() {
    let (_dir, output, _) = clean_raw_csv(
        "Series_Title,Released_Year,Runtime,Genre,IMDB_Rating,Gross\n\
         Oddity,-2147483648,90 min,Drama,7.0,\n",
    );

    let records = load_records(&output).unwrap();
    assert_eq!(records[0].year, Some(i32::MIN));
    assert_eq!(records[0].decade, None);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("imdb_clean.csv");
    let config = CleaningConfig::builder()
        .input_path(dir.path().join("imdb.csv"))
        .output_path(&output)
        .build()
        .unwrap();

    let err = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(err.is_missing_input());
    assert_eq!(err.error_code(), "MISSING_INPUT");
    assert!(!output.exists());
}

#[test]
fn test_structurally_incompatible_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("imdb_clean.csv");
    let config = CleaningConfig::builder()
        .input_path(fixtures_path().join("missing_column.csv"))
        .output_path(&output)
        .build()
        .unwrap();

    let err = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(err.to_string().contains("genre"));
    assert!(!output.exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("imdb_clean.csv");
    let config = CleaningConfig::builder()
        .input_path(fixtures_path().join("imdb_sample.csv"))
        .output_path(&output)
        .save_to_disk(false)
        .build()
        .unwrap();

    let result = Pipeline::builder().config(config).build().unwrap().run().unwrap();

    assert_eq!(result.summary.rows_after, 8);
    assert_eq!(result.data.height(), 8);
    assert!(result.summary.output_path.is_none());
    assert!(!output.exists());
}

#[test]
fn test_summary_serializes_to_json() {
    let (_dir, _output, result) = clean_sample();
    let json = serde_json::to_value(&result.summary).unwrap();

    assert_eq!(json["rows_after"], 8);
    assert!(json["coercions"].as_array().unwrap().len() >= 4);
    assert!(json["generated_at"].is_string());
}
