use std::{num::NonZeroU32, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Result, ScrapeError},
    ratelimit::DEFAULT_NAV_PER_SEC,
    requests::Readiness,
    selectors::SelectorTable,
    text_manipulators::origin_of,
};

pub const ENV_PREFIX: &str = "FRESHA_";
pub const DEFAULT_START_URL: &str = "https://www.fresha.com/lp/en/ae-dubai";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
const DEFAULT_FIXED_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Headless Chrome, for pages rendered by client-side script.
    #[default]
    Browser,
    /// Plain HTTP GET.
    Http,
}

/// Scrape venue listings from a directory page into a spreadsheet.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct CliArgs {
    /// List page to start from.
    pub url: Option<String>,
    /// Directory for timestamped output files.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Write to this exact file instead of a timestamped one.
    #[arg(long)]
    pub output_file: Option<PathBuf>,
    /// JSON selector table overriding the built-in one.
    #[arg(long)]
    pub selectors: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub fetcher: Option<FetcherKind>,
}

/// The env config env vars, all optional, read with the `FRESHA_` prefix.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapingEnv {
    pub start_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub base_origin: Option<String>,
    pub selectors_file: Option<PathBuf>,
    pub fetcher: Option<FetcherKind>,
    pub wait_for_content: Option<bool>,
    pub ready_timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub settle_delay_ms: Option<u64>,
    pub requests_per_sec: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Poll for the expected content instead of sleeping a fixed time.
    pub for_content: bool,
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
    pub settle: Duration,
}

impl WaitConfig {
    pub fn readiness(&self, css: String) -> Readiness {
        if self.for_content {
            Readiness::Selector {
                css,
                timeout: self.ready_timeout,
                poll_interval: self.poll_interval,
                settle: self.settle,
            }
        } else {
            Readiness::Settle(self.settle)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub start_url: String,
    /// Prefixed onto relative detail links.
    pub base_origin: String,
    pub output_dir: PathBuf,
    pub output_file: Option<PathBuf>,
    pub selectors: SelectorTable,
    pub fetcher: FetcherKind,
    pub wait: WaitConfig,
    pub requests_per_sec: NonZeroU32,
}

impl ScrapingConfig {
    pub fn new(cli: CliArgs) -> anyhow::Result<Self> {
        let env = ScrapingEnv::load_from_env()?;
        Self::from_sources(cli, env).context("invalid scraping configuration")
    }

    /// Command line values win over environment values, which win over defaults.
    pub fn from_sources(cli: CliArgs, env: ScrapingEnv) -> Result<Self> {
        let start_url = cli
            .url
            .or(env.start_url)
            .unwrap_or_else(|| DEFAULT_START_URL.to_string());
        let base_origin = match env.base_origin {
            Some(origin) => origin,
            None => origin_of(&start_url)?,
        };

        let selectors = match cli.selectors.or(env.selectors_file) {
            Some(path) => SelectorTable::from_json_file(&path)?,
            None => SelectorTable::default(),
        };

        let for_content = env.wait_for_content.unwrap_or(true);
        let settle = match (env.settle_delay_ms, for_content) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, true) => Duration::ZERO,
            (None, false) => DEFAULT_FIXED_DELAY,
        };
        let wait = WaitConfig {
            for_content,
            ready_timeout: env
                .ready_timeout_ms
                .map_or(DEFAULT_READY_TIMEOUT, Duration::from_millis),
            poll_interval: env
                .poll_interval_ms
                .map_or(DEFAULT_POLL_INTERVAL, Duration::from_millis),
            settle,
        };

        let requests_per_sec = match env.requests_per_sec {
            Some(n) => NonZeroU32::new(n).ok_or_else(|| {
                ScrapeError::Config(format!("{ENV_PREFIX}REQUESTS_PER_SEC must be above zero"))
            })?,
            None => DEFAULT_NAV_PER_SEC,
        };

        Ok(Self {
            start_url,
            base_origin,
            output_dir: cli
                .output_dir
                .or(env.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            output_file: cli.output_file.or(env.output_file),
            selectors,
            fetcher: cli.fetcher.or(env.fetcher).unwrap_or_default(),
            wait,
            requests_per_sec,
        })
    }

    /// The list page is ready once the results container exists.
    pub fn list_readiness(&self) -> Readiness {
        self.wait.readiness(self.selectors.results_root.to_css())
    }

    /// A detail page is ready once an opening-hours row exists.
    pub fn detail_readiness(&self) -> Readiness {
        self.wait.readiness(self.selectors.opening_hours_row.to_css())
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
