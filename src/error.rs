use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("could not launch browser: {0}")]
    BrowserLaunch(String),

    #[error("browser error while loading {url}: {source}")]
    Browser {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("the supplied URL is not valid: {0}")]
    UrlInvalid(String),

    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write spreadsheet: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
