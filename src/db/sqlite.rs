use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::observation::{Observation, ObservationSet};

use super::{OnConflict, PersistenceStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS weather (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sample_date TEXT NOT NULL UNIQUE,
    min_temp REAL,
    max_temp REAL,
    avg_temp REAL
)";

const INSERT_KEEP_EXISTING: &str = "
    INSERT INTO weather (sample_date, min_temp, max_temp, avg_temp)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(sample_date) DO NOTHING";

const INSERT_OVERWRITE: &str = "
    INSERT INTO weather (sample_date, min_temp, max_temp, avg_temp)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(sample_date) DO UPDATE SET
        min_temp = excluded.min_temp,
        max_temp = excluded.max_temp,
        avg_temp = excluded.avg_temp";

/// Observations stored in a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_TABLE, ())
            .context("failed to create weather table")?;

        Ok(SqliteStore { conn })
    }

    /// Stored observations between the optional bounds, inclusive, oldest first.
    pub fn fetch_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>> {
        let mut stmt = self.conn.prepare(
            "SELECT sample_date, min_temp, max_temp, avg_temp FROM weather
             WHERE (?1 IS NULL OR sample_date >= ?1)
               AND (?2 IS NULL OR sample_date <= ?2)
             ORDER BY sample_date",
        )?;

        let observations = stmt
            .query_map(params![start, end], observation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(observations)
    }

    /// Deletes every observation, keeping the table. Returns the rows removed.
    pub fn purge(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM weather", ())?)
    }
}

impl PersistenceStore for SqliteStore {
    fn latest_date(&self) -> Result<Option<NaiveDate>> {
        let latest = self
            .conn
            .query_row("SELECT MAX(sample_date) FROM weather", (), |row| row.get(0))?;

        Ok(latest)
    }

    fn upsert_many(
        &mut self,
        observations: &ObservationSet,
        on_conflict: OnConflict,
    ) -> Result<usize> {
        let sql = match on_conflict {
            OnConflict::KeepExisting => INSERT_KEEP_EXISTING,
            OnConflict::Overwrite => INSERT_OVERWRITE,
        };

        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(sql)?;
            for o in observations.iter() {
                written += stmt.execute(params![o.date, o.min_temp, o.max_temp, o.avg_temp])?;
            }
        }
        tx.commit()?;

        Ok(written)
    }
}

fn observation_from_row(row: &Row<'_>) -> rusqlite::Result<Observation> {
    Ok(Observation {
        date: row.get(0)?,
        min_temp: row.get(1)?,
        max_temp: row.get(2)?,
        avg_temp: row.get(3)?,
    })
}

// -- Tests -------------------------------------------------------------------
