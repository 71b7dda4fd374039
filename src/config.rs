//! Runtime settings, from command line flags or the environment.

use std::{path::PathBuf, time::Duration};

use clap::{builder::RangedU64ValueParser, Args};

use crate::{
    error::FetchError,
    fetch::{HttpFetcher, DEFAULT_BASE_URL, DEFAULT_STATION_ID, DEFAULT_TIMEOUT},
    scrape::EmptyPagePolicy,
};

const DEFAULT_DB_NAME: &str = "weather_data.db";

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// SQLite database holding the observations [default: ~/weather_data.db]
    #[arg(long = "db", env = "WEATHER_DB", global = true)]
    pub db_path: Option<PathBuf>,

    /// Climate station to scrape
    #[arg(
        long,
        env = "WEATHER_STATION",
        global = true,
        default_value_t = DEFAULT_STATION_ID,
        value_parser = RangedU64ValueParser::<u32>::new().range(1..)
    )]
    pub station: u32,

    /// Root of the climate data site
    #[arg(long, env = "WEATHER_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "WEATHER_TIMEOUT_SECS",
        global = true,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = RangedU64ValueParser::<u64>::new().range(1..)
    )]
    pub timeout_secs: u64,

    /// Consecutive empty months taken to mean there is no earlier history
    #[arg(
        long,
        global = true,
        default_value_t = 1,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub empty_months: usize,
}

impl Settings {
    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(DEFAULT_DB_NAME))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn policy(&self) -> EmptyPagePolicy {
        EmptyPagePolicy::new(self.empty_months)
    }

    pub fn fetcher(&self) -> Result<HttpFetcher, FetchError> {
        HttpFetcher::new(&self.base_url, self.station, self.timeout())
    }
}

// -- Tests -------------------------------------------------------------------
