//! Persistence of aggregated station summaries as JSON files.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::summary::AggregateSummary;

/// Writes one station's aggregate to `<station_id>_<end_date>.json` in
/// `dir`, creating the directory if needed.
///
/// The file holds exactly the four summary keys, each a number or `null`,
/// pretty-printed with 4-space indentation (the downstream consumer diffs
/// these files, so the formatting is part of the contract).
pub fn write_summary(
    dir: &Path,
    station_id: &str,
    end_date: NaiveDate,
    summary: &AggregateSummary,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let file_name = format!("{}_{}.json", station_id, end_date.format("%Y-%m-%d"));
    let path = dir.join(&file_name);

    let file = File::create(&path)?;
    let mut ser = serde_json::Serializer::with_formatter(file, PrettyFormatter::with_indent(b"    "));
    summary.serialize(&mut ser)?;

    info!(path = %path.display(), "JSON file created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir); // clean up any prior run
        dir
    }

    fn end_date() -> NaiveDate {
        "2024-05-01".parse().unwrap()
    }

    #[test]
    fn test_file_name_is_station_and_end_date() {
        let dir = temp_dir("pws_scraper_test_name");

        let path = write_summary(&dir, "IAGUAD73", end_date(), &AggregateSummary::default()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "IAGUAD73_2024-05-01.json"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_all_absent_summary_writes_four_nulls() {
        let dir = temp_dir("pws_scraper_test_nulls");

        let path = write_summary(&dir, "KSFO", end_date(), &AggregateSummary::default()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["MaxTemp", "MinTemp", "MaxGust", "SumPrec"] {
            assert!(obj[key].is_null());
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_output_is_indented_with_four_spaces() {
        let dir = temp_dir("pws_scraper_test_indent");

        let summary = AggregateSummary {
            max_temp: Some(80.0),
            min_temp: Some(55.0),
            max_gust: Some(20.0),
            sum_prec: Some(0.3),
        };
        let path = write_summary(&dir, "KSFO", end_date(), &summary).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains("\n    \"MaxTemp\": 80.0"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = temp_dir("pws_scraper_test_mkdir").join("nested");

        let path = write_summary(&dir, "KSFO", end_date(), &AggregateSummary::default()).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
