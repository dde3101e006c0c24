use log::debug;
use scraper::Html;

use crate::{field_extractor::extract_opt, selectors::CompiledSelectors, venue::WeeklySchedule};

/// Reads the opening-hours rows of a venue's detail page.
///
/// Rows missing a day or a range are skipped, unknown day labels are
/// ignored, and a repeated day keeps the last row's hours.
pub fn parse_schedule(document: &Html, selectors: &CompiledSelectors) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();

    for row in document.select(&selectors.opening_hours_row) {
        let day = extract_opt(row, &selectors.opening_hours_day);
        let hours = extract_opt(row, &selectors.opening_hours_range);
        if let (Some(day), Some(hours)) = (day, hours) {
            if !schedule.set(&day, hours) {
                debug!("ignoring opening hours for unknown day label {day:?}");
            }
        }
    }

    schedule
}
