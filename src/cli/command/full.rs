//! Backfill the full history into the database.

use std::sync::{atomic::AtomicBool, Arc};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::{
    cli::create_spinner,
    config::Settings,
    db::{OnConflict, PersistenceStore, SqliteStore},
    scrape::epoch_floor,
};

use super::make_pipeline;

/// Returns the number of observations written.
pub async fn full(settings: &Settings, cancel: Arc<AtomicBool>) -> Result<usize> {
    full_until(settings, cancel, Local::now().date_naive()).await
}

async fn full_until(settings: &Settings, cancel: Arc<AtomicBool>, today: NaiveDate) -> Result<usize> {
    let floor = epoch_floor();
    let bar = create_spinner(format!("Downloading weather data from {floor} to {today}..."));
    let pipeline = make_pipeline(settings, cancel, bar.clone())?;

    let result = pipeline.acquire_full(floor, today).await;
    bar.finish_and_clear();
    let observations = result.context("full download aborted, nothing was saved")?;

    if observations.is_empty() {
        warn!("no observations found");
    }

    let mut store = SqliteStore::open(&settings.db_path())?;
    let written = store.upsert_many(&observations, OnConflict::KeepExisting)?;
    info!(scraped = observations.len(), written, "full download complete");

    Ok(written)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use tempfile::TempDir;
    use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

    use crate::cli::command::fixture::{mount_empty_fallback, mount_month, settings};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn should_backfill_until_history_runs_out() {
        let server = MockServer::start().await;
        mount_month(
            &server,
            2024,
            6,
            &[
                ("June 1, 2024", "20.0", "10.0", "15.0"),
                ("June 2, 2024", "M", "M", "M"),
            ],
        )
        .await;
        mount_month(&server, 2024, 5, &[("May 31, 2024", "18.0", "M", "12.5")]).await;
        mount_empty_fallback(&server).await;

        let tmp_dir = TempDir::new().unwrap();
        let settings = settings(&server, &tmp_dir.path().join("weather.db"));

        let written = full_until(&settings, Arc::default(), date(2024, 6, 30)).await.unwrap();
        assert_eq!(written, 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);

        let store = SqliteStore::open(&settings.db_path()).unwrap();
        let stored = store.fetch_range(None, None).unwrap();
        assert_eq!(stored[0].date, date(2024, 5, 31));
        assert_eq!(stored[0].min_temp, None);
        assert_eq!(stored[1].avg_temp, Some(15.0));
    }

    #[tokio::test]
    async fn should_keep_existing_rows() {
        let server = MockServer::start().await;
        mount_month(&server, 2024, 6, &[("June 1, 2024", "20.0", "10.0", "15.0")]).await;
        mount_empty_fallback(&server).await;

        let tmp_dir = TempDir::new().unwrap();
        let settings = settings(&server, &tmp_dir.path().join("weather.db"));

        assert_eq!(full_until(&settings, Arc::default(), date(2024, 6, 30)).await.unwrap(), 1);
        assert_eq!(full_until(&settings, Arc::default(), date(2024, 6, 30)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_save_nothing_when_a_fetch_fails() {
        let server = MockServer::start().await;
        mount_month(&server, 2024, 6, &[("June 1, 2024", "20.0", "10.0", "15.0")]).await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tmp_dir = TempDir::new().unwrap();
        let settings = settings(&server, &tmp_dir.path().join("weather.db"));

        let result = full_until(&settings, Arc::default(), date(2024, 6, 30)).await;
        assert!(result.is_err());

        let store = SqliteStore::open(&settings.db_path()).unwrap();
        assert_eq!(store.latest_date().unwrap(), None);
    }
}
