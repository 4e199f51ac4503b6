mod collectors;
mod config;
mod error;
mod models;
mod writer;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::collectors::djinni::DjinniParser;
use crate::collectors::http::HttpFetcher;
use crate::collectors::runner::Orchestrator;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("djinni_scraper=info")),
        )
        .init();

    let config = Config::parse();

    let base_url = Url::parse(&config.base_url)
        .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;

    // Resolve the output path up front so a bad date format fails before any
    // network traffic.
    let today = chrono::Local::now().date_naive();
    let output_path = writer::output_path(&config.output_dir, today, &config.date_format)?;

    let fetcher = HttpFetcher::new(&base_url, &config.user_agent, config.request_timeout())?;
    tracing::info!("Restricting requests to {}", fetcher.allowed_host());

    let mut orchestrator = Orchestrator::new(
        Arc::new(fetcher),
        DjinniParser::new()?,
        base_url,
        config.pages,
    );
    if let Some(timeout) = config.page_timeout() {
        orchestrator = orchestrator.with_page_timeout(timeout);
    }

    let report = orchestrator.run().await;

    if let Err(e) = writer::save_to_csv(&report.jobs, &output_path) {
        tracing::error!("{e}");
        return Err(e.into());
    }

    tracing::info!(
        "Saved {} jobs to {}",
        report.jobs.len(),
        output_path.display()
    );

    Ok(())
}
