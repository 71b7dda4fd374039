//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

use crate::config::Settings;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the full history into the database
    Full {},
    /// Fetch observations newer than the latest stored date
    Update {},
    /// Export stored observations to a parquet file
    Export {
        /// First date to export (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last date to export (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Output file [default: ~/weather-<today>.parquet]
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete all stored observations
    Purge {},
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------
