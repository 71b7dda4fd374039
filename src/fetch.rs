//! Fetches one month of daily climate data from the Environment Canada site.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://climate.weather.gc.ca";
pub const DEFAULT_STATION_ID: u32 = 27174;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DAILY_DATA_PATH: &str = "/climate_data/daily_data_e.html";

/// Source of raw month pages. Must be side-effect free from the caller's view.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, year: i32, month: u32) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP, one request per month.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    station_id: u32,
}

impl HttpFetcher {
    pub fn new(base_url: &str, station_id: u32, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpFetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            station_id,
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, DAILY_DATA_PATH)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, year: i32, month: u32) -> Result<String, FetchError> {
        let year = year.to_string();
        let month = month.to_string();
        let query = [
            ("StationID", self.station_id.to_string()),
            ("timeframe", "2".to_string()),
            ("StartYear", "1840".to_string()),
            ("EndYear", year.clone()),
            ("Day", "1".to_string()),
            ("Year", year),
            ("Month", month),
        ];

        let response = self.client.get(self.url()).query(&query).send().await?;
        debug!(url = %response.url(), status = %response.status(), "fetched page");

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

// -- Tests -------------------------------------------------------------------
