use anyhow::Result;

use crate::{config::Settings, db::SqliteStore};

/// Deletes every stored observation, returning how many were removed.
pub fn purge(settings: &Settings) -> Result<usize> {
    SqliteStore::open(&settings.db_path())?.purge()
}
