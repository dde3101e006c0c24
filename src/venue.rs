use std::fmt;

/// Placeholder written into any field whose source fragment could not be found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Day labels as they appear on the detail page, in column order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    MenOnly,
    WomenOnly,
    None,
}

impl Gender {
    /// Closed set of badge texts, checked in order.
    pub const BADGES: [(&'static str, Gender); 2] =
        [("Men only", Gender::MenOnly), ("Women only", Gender::WomenOnly)];

    pub fn from_badge(text: &str) -> Option<Self> {
        Self::BADGES
            .iter()
            .find(|(label, _)| text.contains(label))
            .map(|(_, gender)| *gender)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::MenOnly => "Men only",
            Gender::WomenOnly => "Women only",
            Gender::None => "None",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary fields read off one card of the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub name: String,
    pub address: String,
    pub rating: String,
    /// `None` when no badge lookup is configured.
    pub gender: Option<Gender>,
    pub detail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOffering {
    pub service_name: String,
    pub price: String,
}

/// One parsed card: the summary plus its services in card order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueCard {
    pub summary: VenueSummary,
    pub services: Vec<ServiceOffering>,
}

/// Opening hours keyed by the seven fixed weekday labels.
///
/// Every day is always present; days the detail page did not mention hold
/// [`NOT_AVAILABLE`]. Labels outside [`WEEKDAYS`] are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    hours: [String; 7],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            hours: std::array::from_fn(|_| NOT_AVAILABLE.to_string()),
        }
    }
}

impl WeeklySchedule {
    /// Overwrites the hours for `day`. Returns `false` if `day` is not a
    /// known weekday label, in which case nothing changes.
    pub fn set(&mut self, day: &str, hours: impl Into<String>) -> bool {
        match WEEKDAYS.iter().position(|d| *d == day) {
            Some(idx) => {
                self.hours[idx] = hours.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, day: &str) -> Option<&str> {
        WEEKDAYS
            .iter()
            .position(|d| *d == day)
            .map(|idx| self.hours[idx].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        WEEKDAYS
            .iter()
            .copied()
            .zip(self.hours.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// The flattened row written to the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueRecord {
    pub name: String,
    pub address: String,
    pub gender: Option<Gender>,
    pub rating: String,
    pub schedule: WeeklySchedule,
    /// Padded to the batch-wide service count after finalisation.
    pub services: Vec<ServiceOffering>,
}
