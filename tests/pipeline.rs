use std::{cell::RefCell, collections::HashMap, path::Path, path::PathBuf};

use fresha_scraper::{
    CliArgs, NOT_AVAILABLE, PageFetcher, Readiness, RunOutcome, ScrapeError, ScrapingConfig,
    ScrapingContext, ScrapingEnv, SpreadsheetExporter, XlsxExporter, scrape_venues,
};

const LIST_URL: &str = "https://www.fresha.com/lp/en/ae-dubai";

/// Serves canned pages; unknown URLs fail like a page that never loaded.
struct FakeFetcher {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.clone()))
                .collect(),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _readiness: &Readiness) -> fresha_scraper::Result<String> {
        self.requested.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::UrlInvalid(url.to_string()))
    }
}

#[derive(Default)]
struct RecordingExporter {
    exports: RefCell<Vec<(Vec<String>, Vec<Vec<String>>, PathBuf)>>,
}

impl SpreadsheetExporter for RecordingExporter {
    fn export(&self, columns: &[String], rows: &[Vec<String>], path: &Path) -> fresha_scraper::Result<()> {
        self.exports
            .borrow_mut()
            .push((columns.to_vec(), rows.to_vec(), path.to_path_buf()));
        Ok(())
    }
}

fn context(output_file: Option<PathBuf>) -> ScrapingContext {
    let cli = CliArgs {
        url: Some(LIST_URL.to_string()),
        output_file,
        ..Default::default()
    };
    let config = ScrapingConfig::from_sources(cli, ScrapingEnv::default()).unwrap();
    ScrapingContext::new(config).unwrap()
}

fn card(href: &str, info: &str, services: &[(&str, &str)]) -> String {
    let items: String = services
        .iter()
        .map(|(name, price)| {
            format!(
                r#"<li class="zwLQ3F"><p class="axDOAG deeUT2 wWy3dW">{name}</p><p class="axDOAG deeUT2 e4rbA0">{price}</p></li>"#
            )
        })
        .collect();
    format!(
        r#"<div class="paUULP Z1aKNU"><a class="OP1nBW KzVzOx" href="{href}">{info}</a><ul class="HSm7QR">{items}</ul></div>"#
    )
}

fn info(name: &str) -> String {
    format!(
        r#"<div class="nd2h5g">
             <p class="axDOAG zL1l9a deeUT2 NH5kAF">{name}</p>
             <p class="axDOAG TE8kwS DbgFmO deeUT2">Jumeirah, Dubai</p>
             <p class="axDOAG VH00E7 eGBYyp SycVRT tWrves">5.0</p>
           </div>"#
    )
}

fn list_page(cards: &[String]) -> String {
    format!(
        r#"<html><body><header>Find a salon</header><div class="ts_bNq">{}</div></body></html>"#,
        cards.concat()
    )
}

fn detail_page(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(day, hours)| {
            format!(
                r#"<div data-qa="opening-hours-row"><p data-qa="opening-hours-day">{day}</p><p data-qa="opening-hours-range">{hours}</p></div>"#
            )
        })
        .collect();
    format!("<html><body><h1>Venue</h1>{rows}</body></html>")
}

#[tokio::test]
async fn scrapes_list_and_detail_pages_into_one_table() {
    let fetcher = FakeFetcher::new(&[
        (
            LIST_URL,
            list_page(&[
                card("/a/glow-spa", &info("Glow Spa"), &[("Haircut", "AED\u{a0}120")]),
                card("/a/bare", "", &[]),
                card(
                    "/a/triple",
                    &info("Triple"),
                    &[("Nails", "AED 80"), ("Massage", "AED 300"), ("Facial", "AED 250")],
                ),
            ]),
        ),
        (
            "https://www.fresha.com/a/glow-spa",
            detail_page(&[("Monday", "9:00–18:00"), ("Friday", "Closed")]),
        ),
        (
            "https://www.fresha.com/a/triple",
            detail_page(&[("Sunday", "10:00–22:00")]),
        ),
    ]);
    let exporter = RecordingExporter::default();
    let fixed = PathBuf::from("out/venues.xlsx");

    let outcome = scrape_venues(&context(Some(fixed.clone())), &fetcher, &exporter)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        RunOutcome::Exported {
            path: fixed.clone(),
            venues: 3
        }
    );

    assert_eq!(
        *fetcher.requested.borrow(),
        vec![
            LIST_URL.to_string(),
            "https://www.fresha.com/a/glow-spa".to_string(),
            "https://www.fresha.com/a/bare".to_string(),
            "https://www.fresha.com/a/triple".to_string(),
        ]
    );

    let exports = exporter.exports.borrow();
    assert_eq!(exports.len(), 1);
    let (columns, rows, path) = &exports[0];
    assert_eq!(path, &fixed);
    assert_eq!(
        columns[..11],
        [
            "Name", "Address", "Gender", "Rating", "Monday", "Tuesday", "Wednesday", "Thursday",
            "Friday", "Saturday", "Sunday"
        ]
    );
    assert_eq!(columns.len(), 11 + 6);
    assert_eq!(columns[16], "Price_3");

    let glow = &rows[0];
    assert_eq!(glow[..4], ["Glow Spa", "Jumeirah, Dubai", "None", "5.0"]);
    assert_eq!(glow[4], "9:00–18:00");
    assert_eq!(glow[8], "Closed");
    assert_eq!(glow[11..13], ["Haircut", "AED 120"]);
    assert!(glow[13..].iter().all(|cell| cell == NOT_AVAILABLE));

    // The bare card's detail page is not served: its schedule stays at the sentinel.
    let bare = &rows[1];
    assert_eq!(bare[..4], [NOT_AVAILABLE, NOT_AVAILABLE, "None", NOT_AVAILABLE]);
    assert!(bare[4..].iter().all(|cell| cell == NOT_AVAILABLE));

    let triple = &rows[2];
    assert_eq!(triple[10], "10:00–22:00");
    assert_eq!(triple[15..17], ["Facial", "AED 250"]);
}

#[tokio::test]
async fn empty_listing_skips_export() {
    let fetcher = FakeFetcher::new(&[(LIST_URL, "<html><body><p>No results</p></body></html>".to_string())]);
    let exporter = RecordingExporter::default();

    let outcome = scrape_venues(&context(None), &fetcher, &exporter).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoVenues);
    assert!(exporter.exports.borrow().is_empty());
    assert_eq!(fetcher.requested.borrow().len(), 1);
}

#[tokio::test]
async fn list_page_failure_is_an_error() {
    let fetcher = FakeFetcher::new(&[]);
    let exporter = RecordingExporter::default();

    let result = scrape_venues(&context(None), &fetcher, &exporter).await;

    assert!(matches!(result, Err(ScrapeError::UrlInvalid(_))));
}

#[tokio::test]
async fn export_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the workbook should go makes the write fail.
    let blocked = dir.path().join("venues.xlsx");
    std::fs::create_dir(&blocked).unwrap();

    let fetcher = FakeFetcher::new(&[(LIST_URL, list_page(&[card("/a/x", &info("X"), &[])]))]);
    let result = scrape_venues(&context(Some(blocked)), &fetcher, &XlsxExporter::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn writes_real_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("venues.xlsx");
    let fetcher = FakeFetcher::new(&[(LIST_URL, list_page(&[card("/a/x", &info("X"), &[])]))]);

    let outcome = scrape_venues(&context(Some(path.clone())), &fetcher, &XlsxExporter::default())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Exported { path: path.clone(), venues: 1 });
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
