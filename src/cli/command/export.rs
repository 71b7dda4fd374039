//! Export stored observations to parquet.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::{cli::create_spinner, config::Settings, db::SqliteStore, parquet};

use super::make_parquet_file_name;

/// Returns the file written and the number of observations in it.
pub fn export(
    settings: &Settings,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<(String, usize)> {
    let file_path = output.unwrap_or_else(make_parquet_file_name);

    let store = SqliteStore::open(&settings.db_path())?;
    let observations = store.fetch_range(start, end)?;

    let bar = create_spinner("Writing parquet file...".to_string());
    parquet::save_observations(&observations, &file_path)?;
    bar.finish_with_message("Parquet file written");

    Ok((file_path.to_string_lossy().to_string(), observations.len()))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use crate::{
        db::{OnConflict, PersistenceStore},
        observation::{Observation, ObservationSet},
    };

    use super::*;

    #[test]
    fn should_export_requested_range() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("weather.db");
        let output = tmp_dir.path().join("out.parquet");

        let set: ObservationSet = (1..=10)
            .map(|day| Observation {
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                min_temp: None,
                max_temp: Some(day as f64),
                avg_temp: None,
            })
            .collect();
        SqliteStore::open(&db_path)
            .unwrap()
            .upsert_many(&set, OnConflict::KeepExisting)
            .unwrap();

        let settings = Settings {
            db_path: Some(db_path),
            station: 27174,
            base_url: "http://localhost".to_string(),
            timeout_secs: 1,
            empty_months: 1,
        };

        let (file_name, count) = export(
            &settings,
            NaiveDate::from_ymd_opt(2024, 6, 3),
            NaiveDate::from_ymd_opt(2024, 6, 5),
            Some(output.clone()),
        )
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(file_name, output.to_string_lossy());
        assert!(output.exists());
    }
}
