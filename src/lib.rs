mod browser;
mod config;
mod error;
mod exporter;
mod field_extractor;
mod pipeline;
mod ratelimit;
mod requests;
mod row_assembler;
mod schedule_scraper;
mod scraping_context;
mod selectors;
mod text_manipulators;
mod venue;
mod venue_card_scraper;

pub use browser::BrowserSession;
pub use config::{CliArgs, FetcherKind, LoadFromEnv, ScrapingConfig, ScrapingEnv, WaitConfig};
pub use error::{Result, ScrapeError};
pub use exporter::{SpreadsheetExporter, XlsxExporter, column_widths, output_path};
pub use field_extractor::extract;
pub use pipeline::{RunOutcome, run, scrape_venues};
pub use ratelimit::RateLimiter;
pub use requests::{HttpFetcher, PageFetcher, Readiness};
pub use row_assembler::{FinalizedBatch, RecordBatch, assemble};
pub use schedule_scraper::parse_schedule;
pub use scraping_context::ScrapingContext;
pub use selectors::{
    AttrMatch, CompiledPath, CompiledSelectors, CompiledServices, FieldPath, SelectorTable,
    ServiceSelectors, Step,
};
pub use venue::{
    Gender, NOT_AVAILABLE, ServiceOffering, VenueCard, VenueRecord, VenueSummary, WEEKDAYS,
    WeeklySchedule,
};
pub use venue_card_scraper::parse_cards;
