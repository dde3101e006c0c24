use crate::{
    config::ScrapingConfig,
    error::Result,
    selectors::CompiledSelectors,
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub selectors: CompiledSelectors,
}

impl ScrapingContext {
    pub fn new(scraping_config: ScrapingConfig) -> Result<Self> {
        let selectors = scraping_config.selectors.compile()?;
        Ok(ScrapingContext {
            scraping_config,
            selectors,
        })
    }
}
