use log::debug;
use scraper::{ElementRef, Html};

use crate::{
    field_extractor::{extract, find_first, find_path},
    selectors::{CompiledSelectors, CompiledServices},
    text_manipulators::{extract_text, get_html_link_to_page},
    venue::{Gender, NOT_AVAILABLE, ServiceOffering, VenueCard, VenueSummary},
};

/// Parses every venue card on a rendered list page, in document order.
///
/// A page without the results container yields no cards. Cards without a
/// detail link are dropped.
pub fn parse_cards(document: &Html, selectors: &CompiledSelectors, base_origin: &str) -> Vec<VenueCard> {
    let Some(root) = document.select(&selectors.results_root).next() else {
        debug!("results container not found on list page");
        return vec![];
    };

    root.select(&selectors.card)
        .enumerate()
        .filter_map(|(idx, card)| {
            let parsed = parse_card(card, selectors, base_origin);
            if parsed.is_none() {
                debug!("card {} has no detail link, skipping", idx + 1);
            }
            parsed
        })
        .collect()
}

pub fn parse_card(card: ElementRef, selectors: &CompiledSelectors, base_origin: &str) -> Option<VenueCard> {
    let link = find_first(card, &selectors.detail_link)?;

    let detail_url = link
        .value()
        .attr("href")
        .filter(|href| !href.trim().is_empty())
        .map(|href| get_html_link_to_page(base_origin, href));

    let (name, address, rating) = match find_first(link, &selectors.info) {
        Some(info) => (
            extract(info, &selectors.name),
            extract(info, &selectors.address),
            extract(info, &selectors.rating),
        ),
        None => (
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        ),
    };
    debug!("name: {name}, address: {address}, rating: {rating}");

    let gender = selectors.badge.as_ref().map(|badge| {
        find_path(card, badge)
            .and_then(|node| {
                node.text()
                    .find_map(Gender::from_badge)
                    .or_else(|| Gender::from_badge(&extract_text(node)))
            })
            .unwrap_or(Gender::None)
    });

    let services = selectors
        .services
        .as_ref()
        .map(|s| parse_services(card, s))
        .unwrap_or_default();

    Some(VenueCard {
        summary: VenueSummary {
            name,
            address,
            rating,
            gender,
            detail_url,
        },
        services,
    })
}

fn parse_services(card: ElementRef, selectors: &CompiledServices) -> Vec<ServiceOffering> {
    let Some(list) = find_path(card, &selectors.list) else {
        return vec![];
    };
    list.select(&selectors.item)
        .map(|item| ServiceOffering {
            service_name: extract(item, &selectors.name),
            price: extract(item, &selectors.price),
        })
        .collect()
}
