//! Durable storage of observations, keyed by date.

pub mod sqlite;

use anyhow::Result;
use chrono::NaiveDate;

use crate::observation::ObservationSet;

pub use sqlite::SqliteStore;

/// What an upsert does with a date that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Leave the stored observation untouched. Used for historical backfill.
    KeepExisting,
    /// Replace the stored observation. Used for incremental updates.
    Overwrite,
}

pub trait PersistenceStore {
    /// Latest date held by the store, if any.
    fn latest_date(&self) -> Result<Option<NaiveDate>>;

    /// Writes every observation in one transaction, returning the rows changed.
    fn upsert_many(&mut self, observations: &ObservationSet, on_conflict: OnConflict)
        -> Result<usize>;
}
