use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::ElementRef;

use crate::error::{Result, ScrapeError};

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme regex is valid")
});

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Cleans text pulled from the page before it is stored.
///
/// Non-breaking spaces become plain spaces, characters that do not survive a
/// spreadsheet round-trip (replacement characters, control characters) are
/// dropped, and surrounding whitespace is trimmed.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\u{a0}' | '\u{202f}' => Some(' '),
            '\u{fffd}' => None,
            c if c.is_control() && !c.is_whitespace() => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Scheme, host and port of `url`, e.g. `https://www.fresha.com`.
pub fn origin_of(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::UrlInvalid(format!("{url}: {e}")))?;
    let origin = parsed.origin();
    if origin.is_tuple() {
        Ok(origin.ascii_serialization())
    } else {
        Err(ScrapeError::UrlInvalid(url.to_string()))
    }
}

/// Turns a card's `href` into an absolute link to the venue's page.
pub fn get_html_link_to_page(base_origin: &str, href: &str) -> String {
    let href = href.trim();
    if SCHEME.is_match(href) {
        return href.to_string();
    }
    let base = base_origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_nbsp_and_trims() {
        assert_eq!(normalize_text("  AED\u{a0}120 \n"), "AED 120");
        assert_eq!(normalize_text("Caf\u{fffd}e\u{7}"), "Cafe");
    }

    #[test]
    fn relative_links_get_the_origin() {
        let base = "https://www.fresha.com";
        assert_eq!(
            get_html_link_to_page(base, "/a/glow-spa-dubai-abc"),
            "https://www.fresha.com/a/glow-spa-dubai-abc"
        );
        assert_eq!(
            get_html_link_to_page("https://www.fresha.com/", "a/x"),
            "https://www.fresha.com/a/x"
        );
        assert_eq!(
            get_html_link_to_page(base, "https://other.example/a/x"),
            "https://other.example/a/x"
        );
    }

    #[test]
    fn origin_drops_path_and_query() {
        assert_eq!(
            origin_of("https://www.fresha.com/lp/en/ae-dubai?page=2").unwrap(),
            "https://www.fresha.com"
        );
        assert!(origin_of("not a url").is_err());
    }
}
