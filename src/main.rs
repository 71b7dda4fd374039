mod cli;
mod config;
mod db;
mod error;
mod fetch;
mod observation;
mod parquet;
mod scrape;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let cli = Cli::parse();
    let settings = &cli.settings;
    let db_path = settings.db_path();

    match cli.command {
        Commands::Full {} => {
            let written = command::full(settings, cancel_on_ctrl_c()).await?;
            println!("Saved {} observations to `{}`", written, db_path.display());
        }
        Commands::Update {} => match command::update(settings, cancel_on_ctrl_c()).await? {
            Some(written) => println!("Saved {} observations to `{}`", written, db_path.display()),
            None => println!("Weather data is already up to date"),
        },
        Commands::Export { start, end, output } => {
            let (file_name, count) = command::export(settings, start, end, output)?;
            println!("Exported {} observations to `{}`", count, file_name);
        }
        Commands::Purge {} => {
            let removed = command::purge(settings)?;
            println!("Removed {} observations from `{}`", removed, db_path.display());
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Raised on Ctrl-C; the scrape stops before its next month.
fn cancel_on_ctrl_c() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping before the next month");
            flag.store(true, Ordering::Relaxed);
        }
    });

    cancel
}
