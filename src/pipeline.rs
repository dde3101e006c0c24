use std::path::PathBuf;

use chrono::Local;
use log::{debug, info, warn};
use scraper::Html;

use crate::{
    browser::BrowserSession,
    config::FetcherKind,
    error::Result,
    exporter::{SpreadsheetExporter, XlsxExporter, output_path},
    ratelimit::RateLimiter,
    requests::{HttpFetcher, PageFetcher},
    row_assembler::RecordBatch,
    schedule_scraper::parse_schedule,
    scraping_context::ScrapingContext,
    venue::{VenueCard, WeeklySchedule},
    venue_card_scraper::parse_cards,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Exported { path: PathBuf, venues: usize },
    /// The list page had no results container or no usable cards.
    NoVenues,
}

/// Runs a scrape with the fetcher the config asks for.
///
/// A browser session lives exactly as long as the run and is closed on
/// every way out of it.
pub async fn run(ctx: &ScrapingContext) -> Result<RunOutcome> {
    let rate_limiter = RateLimiter::new(ctx.scraping_config.requests_per_sec);
    let exporter = XlsxExporter::default();

    match ctx.scraping_config.fetcher {
        FetcherKind::Browser => {
            let session = BrowserSession::launch(rate_limiter).await?;
            let outcome = scrape_venues(ctx, &session, &exporter).await;
            session.close().await;
            outcome
        }
        FetcherKind::Http => {
            let fetcher = HttpFetcher::new(rate_limiter)?;
            scrape_venues(ctx, &fetcher, &exporter).await
        }
    }
}

/// List page, then each venue's detail page in turn, then one export.
pub async fn scrape_venues<F, E>(ctx: &ScrapingContext, fetcher: &F, exporter: &E) -> Result<RunOutcome>
where
    F: PageFetcher,
    E: SpreadsheetExporter,
{
    let config = &ctx.scraping_config;

    let list_html = fetcher.fetch(&config.start_url, &config.list_readiness()).await?;
    info!("Website loaded: {}", config.start_url);

    let cards = {
        let document = Html::parse_document(&list_html);
        parse_cards(&document, &ctx.selectors, &config.base_origin)
    };
    info!("Found {} venues", cards.len());

    let mut batch = RecordBatch::new();
    let total = cards.len();
    for (idx, card) in cards.into_iter().enumerate() {
        info!("--- Processing venue {}/{}: {} ---", idx + 1, total, card.summary.name);
        let schedule = fetch_schedule(ctx, fetcher, &card).await;
        batch.push(card, schedule);
    }

    if batch.is_empty() {
        info!("No venues found");
        return Ok(RunOutcome::NoVenues);
    }

    let batch = batch.finalize();
    let path = output_path(&config.output_dir, config.output_file.as_deref(), Local::now());
    exporter.export(&batch.column_order(), &batch.rows(), &path)?;

    let venues = batch.records().len();
    info!("Successfully extracted {venues} venues");
    Ok(RunOutcome::Exported { path, venues })
}

/// A failed detail page leaves that venue's schedule at its defaults.
async fn fetch_schedule<F: PageFetcher>(ctx: &ScrapingContext, fetcher: &F, card: &VenueCard) -> WeeklySchedule {
    let Some(url) = card.summary.detail_url.as_deref() else {
        return WeeklySchedule::default();
    };

    info!("Visiting venue page: {url}");
    match fetcher.fetch(url, &ctx.scraping_config.detail_readiness()).await {
        Ok(html) => {
            let document = Html::parse_document(&html);
            let schedule = parse_schedule(&document, &ctx.selectors);
            debug!("Opening times: {schedule:?}");
            schedule
        }
        Err(e) => {
            warn!("Error getting opening times from {url}: {e}");
            WeeklySchedule::default()
        }
    }
}
