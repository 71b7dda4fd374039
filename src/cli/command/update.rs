//! Bring the database up to date.

use std::sync::{atomic::AtomicBool, Arc};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::{
    cli::create_spinner,
    config::Settings,
    db::{OnConflict, PersistenceStore, SqliteStore},
    scrape::UpdateOutcome,
};

use super::make_pipeline;

/// Returns `None` when the database was already current, otherwise the
/// number of observations written.
pub async fn update(settings: &Settings, cancel: Arc<AtomicBool>) -> Result<Option<usize>> {
    update_until(settings, cancel, Local::now().date_naive()).await
}

async fn update_until(
    settings: &Settings,
    cancel: Arc<AtomicBool>,
    today: NaiveDate,
) -> Result<Option<usize>> {
    let mut store = SqliteStore::open(&settings.db_path())?;
    let latest = store.latest_date()?;

    match latest {
        Some(latest) => info!(%latest, %today, "resuming after latest stored date"),
        None => info!(%today, "database is empty, downloading full history"),
    }

    let bar = create_spinner("Updating weather data...".to_string());
    let pipeline = make_pipeline(settings, cancel, bar.clone())?;

    let result = pipeline.acquire_update(latest, today).await;
    bar.finish_and_clear();

    let observations = match result.context("update aborted, nothing was saved")? {
        UpdateOutcome::AlreadyCurrent => return Ok(None),
        UpdateOutcome::Acquired(observations) => observations,
    };

    if observations.is_empty() {
        warn!("no new observations found");
    }

    let written = store.upsert_many(&observations, OnConflict::Overwrite)?;
    info!(scraped = observations.len(), written, "update complete");

    Ok(Some(written))
}

// -- Tests -------------------------------------------------------------------
