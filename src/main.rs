use anyhow::{Context, Result};
use tracing::info;

mod browser;
mod config;
mod error;
mod models;
mod parsers;
mod scrapers;
mod storage;
mod utils;

use crate::browser::{ChromeSession, SnapshotPage};
use crate::config::Config;
use crate::models::MovieRow;
use crate::scrapers::{scrape_chart, scrape_in_session};
use crate::storage::{CsvStorage, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("imdb_top_scraper=info".parse()?),
        )
        .init();

    info!("Starting IMDb Top scraper");

    let config = Config::load()?;

    let rows = match &config.html_snapshot {
        Some(path) => {
            info!("Reading saved chart from {}", path.display());
            let page = SnapshotPage::from_file(path)?;
            scrape_chart(&page, &config).await?
        }
        None => scrape_live(&config).await?,
    };

    let storage = CsvStorage::new(&config.output_path);
    let written = storage
        .write_rows(rows)
        .with_context(|| format!("Failed to write {}", storage.path().display()))?;

    info!("Scraped {} movies -> {}", written, storage.path().display());
    Ok(())
}

/// Drive a real browser through the chart.
async fn scrape_live(config: &Config) -> Result<Vec<MovieRow>> {
    let session = ChromeSession::launch(&config.browser)
        .await
        .context("Failed to launch browser")?;

    Ok(scrape_in_session(session, config).await?)
}
