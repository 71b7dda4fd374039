pub mod export;
pub mod full;
pub mod purge;
pub mod update;

use std::{
    path::PathBuf,
    sync::{atomic::AtomicBool, Arc},
};

use anyhow::Result;
use chrono::{Datelike, Local};
use indicatif::ProgressBar;

pub use export::export;
pub use full::full;
pub use purge::purge;
pub use update::update;

use crate::{config::Settings, fetch::HttpFetcher, scrape::AcquisitionPipeline};

pub fn make_parquet_file_name() -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "weather-{}-{:02}-{:02}.parquet",
        today.year(),
        today.month(),
        today.day()
    );

    dirs::home_dir().unwrap_or_default().join(file_name)
}

fn make_pipeline(
    settings: &Settings,
    cancel: Arc<AtomicBool>,
    progress: ProgressBar,
) -> Result<AcquisitionPipeline<HttpFetcher>> {
    let pipeline = AcquisitionPipeline::new(settings.fetcher()?)
        .with_policy(settings.policy())
        .with_cancellation(cancel)
        .with_progress(progress);

    Ok(pipeline)
}
