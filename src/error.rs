//! Errors raised while acquiring pages from the data source.

use reqwest::StatusCode;
use thiserror::Error;

/// A month's page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),
}

/// An acquisition run was aborted. Nothing gathered before the abort is returned.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to fetch {year}-{month:02}")]
    Fetch {
        year: i32,
        month: u32,
        #[source]
        source: FetchError,
    },

    #[error("cancelled before fetching {year}-{month:02}")]
    Cancelled { year: i32, month: u32 },
}
