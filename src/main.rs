use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use fresha_scraper::{CliArgs, RunOutcome, ScrapingConfig, ScrapingContext};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::{error, info};

async fn run_venue_scraper_job(cli: CliArgs) -> anyhow::Result<RunOutcome> {
    let scraping_config = ScrapingConfig::new(cli)?;
    let ctx = ScrapingContext::new(scraping_config).context("failed to compile selector table")?;
    let outcome = fresha_scraper::run(&ctx)
        .await
        .with_context(|| format!("scrape of {} failed", ctx.scraping_config.start_url))?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = CliArgs::parse();
    match run_venue_scraper_job(cli).await {
        Ok(RunOutcome::Exported { path, venues }) => {
            info!("Wrote {venues} venues to {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoVenues) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
