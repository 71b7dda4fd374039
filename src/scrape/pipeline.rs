//! Month-by-month acquisition of daily observations.
//!
//! Months are visited newest first, one fetch at a time. A fetch failure
//! aborts the whole run; a malformed row only drops that row. Pages without
//! any dated row are read as the edge of available history, see
//! [`EmptyPagePolicy`].

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::NaiveDate;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::{
    error::AcquisitionError,
    fetch::PageFetcher,
    observation::{ObservationSet, ScrapeRange},
};

use super::{
    month_cursor::MonthCursor,
    normalise::normalise,
    page::Page,
    resolve::{resolve, Resolution},
};

/// When to treat empty pages as "no more history".
///
/// The source serves empty tables for months before its first record, so an
/// empty page ends the walk. This cannot tell a sparse month from the end of
/// history; raising `consecutive` requires that many empty months in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPagePolicy {
    consecutive: usize,
}

impl EmptyPagePolicy {
    pub fn new(consecutive: usize) -> Self {
        EmptyPagePolicy {
            consecutive: consecutive.max(1),
        }
    }

    /// `empty_run` is the number of consecutive empty pages seen so far.
    pub fn should_stop(&self, empty_run: usize) -> bool {
        empty_run >= self.consecutive
    }
}

impl Default for EmptyPagePolicy {
    fn default() -> Self {
        EmptyPagePolicy::new(1)
    }
}

/// Result of an update request.
#[derive(Debug, PartialEq)]
pub enum UpdateOutcome {
    Acquired(ObservationSet),
    AlreadyCurrent,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PageSummary {
    candidates: usize,
    accepted: usize,
}

pub struct AcquisitionPipeline<F> {
    fetcher: F,
    policy: EmptyPagePolicy,
    cancel: Option<Arc<AtomicBool>>,
    progress: ProgressBar,
}

impl<F: PageFetcher> AcquisitionPipeline<F> {
    pub fn new(fetcher: F) -> Self {
        AcquisitionPipeline {
            fetcher,
            policy: EmptyPagePolicy::default(),
            cancel: None,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_policy(mut self, policy: EmptyPagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checked between months; a set flag aborts the run.
    pub fn with_cancellation(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Scrapes everything from `floor` through `today`.
    pub async fn acquire_full(
        &self,
        floor: NaiveDate,
        today: NaiveDate,
    ) -> Result<ObservationSet, AcquisitionError> {
        self.run(ScrapeRange::new(floor, today)).await
    }

    /// Scrapes what is missing after `latest_persisted`, if anything.
    pub async fn acquire_update(
        &self,
        latest_persisted: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<UpdateOutcome, AcquisitionError> {
        match resolve(latest_persisted, today) {
            Resolution::AlreadyCurrent => Ok(UpdateOutcome::AlreadyCurrent),
            Resolution::Scrape(range) => Ok(UpdateOutcome::Acquired(self.run(range).await?)),
        }
    }

    pub async fn run(&self, range: ScrapeRange) -> Result<ObservationSet, AcquisitionError> {
        let mut observations = ObservationSet::new();
        if range.is_empty() {
            return Ok(observations);
        }

        info!(start = %range.start_date, end = %range.end_date, "acquiring observations");

        let mut empty_run = 0;
        for (year, month) in MonthCursor::new(range.start_date, range.end_date) {
            if self.is_cancelled() {
                return Err(AcquisitionError::Cancelled { year, month });
            }

            self.progress.set_message(format!("Scraping {year}-{month:02}"));

            let markup = self
                .fetcher
                .fetch(year, month)
                .await
                .map_err(|source| AcquisitionError::Fetch {
                    year,
                    month,
                    source,
                })?;

            let summary = merge_page(&markup, &mut observations);
            self.progress.inc(1);

            if summary.candidates == 0 {
                empty_run += 1;
                if self.policy.should_stop(empty_run) {
                    warn!(year, month, "empty page, assuming no earlier history");
                    break;
                }
                continue;
            }
            empty_run = 0;

            debug!(
                year,
                month,
                accepted = summary.accepted,
                rejected = summary.candidates - summary.accepted,
                "parsed page"
            );
        }

        info!(count = observations.len(), "acquisition complete");

        Ok(observations)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

fn merge_page(markup: &str, observations: &mut ObservationSet) -> PageSummary {
    let page = Page::parse(markup);
    let mut summary = PageSummary::default();

    for row in page.rows() {
        summary.candidates += 1;
        if let Some(observation) = normalise(&row) {
            observations.insert(observation);
            summary.accepted += 1;
        }
    }

    summary
}

// -- Tests -------------------------------------------------------------------
