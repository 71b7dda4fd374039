//! Decides what an update run has to fetch given what is already stored.

use chrono::NaiveDate;

use crate::observation::ScrapeRange;

/// Earliest date the source is assumed to hold.
pub fn epoch_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("epoch floor is a valid date")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Scrape(ScrapeRange),
    AlreadyCurrent,
}

/// Computes the range to scrape from the latest persisted date.
pub fn resolve(latest_persisted: Option<NaiveDate>, today: NaiveDate) -> Resolution {
    match latest_persisted {
        None => Resolution::Scrape(ScrapeRange::new(epoch_floor(), today)),
        Some(latest) if latest >= today => Resolution::AlreadyCurrent,
        Some(latest) => match latest.succ_opt() {
            Some(start_date) => Resolution::Scrape(ScrapeRange::new(start_date, today)),
            None => Resolution::AlreadyCurrent,
        },
    }
}

// -- Tests -------------------------------------------------------------------
