//! Every structural lookup the parsers perform, kept as data.
//!
//! The directory site ships generated class names that change between
//! deployments. Adapting to new markup means editing a [`SelectorTable`]
//! (or a JSON file loaded into one), never the parsers.

use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// `name="value"` attribute requirement, used for `data-*` markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrMatch {
    pub name: String,
    pub value: String,
}

/// One "find first descendant" hop: a tag plus the classes and attribute it
/// must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub tag: String,
    #[serde(default)]
    pub class: Vec<String>,
    #[serde(default)]
    pub attr: Option<AttrMatch>,
}

impl Step {
    pub fn classed(tag: &str, classes: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            class: classes.iter().map(|c| c.to_string()).collect(),
            attr: None,
        }
    }

    pub fn marked(tag: &str, name: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: Vec::new(),
            attr: Some(AttrMatch {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Renders the step as a compound CSS selector, e.g. `p.a.b[data-qa="x"]`.
    pub fn to_css(&self) -> String {
        let mut css = self.tag.clone();
        for class in &self.class {
            css.push('.');
            css.push_str(class);
        }
        if let Some(attr) = &self.attr {
            css.push_str(&format!(
                "[{}=\"{}\"]",
                attr.name,
                attr.value.replace('"', "\\\"")
            ));
        }
        css
    }

    pub fn compile(&self) -> Result<Selector> {
        let css = self.to_css();
        Selector::parse(&css).map_err(|e| ScrapeError::Selector {
            css: css.clone(),
            reason: e.to_string(),
        })
    }
}

/// Ordered chain of steps, each searched inside the previous match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(pub Vec<Step>);

impl FieldPath {
    pub fn compile(&self) -> Result<CompiledPath> {
        if self.0.is_empty() {
            return Err(ScrapeError::Config("field path has no steps".to_string()));
        }
        let steps = self.0.iter().map(Step::compile).collect::<Result<_>>()?;
        Ok(CompiledPath(steps))
    }
}

impl From<Vec<Step>> for FieldPath {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledPath(pub Vec<Selector>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelectors {
    /// Container holding the service items, searched inside the card.
    pub list: FieldPath,
    pub item: Step,
    pub name: FieldPath,
    pub price: FieldPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    pub results_root: Step,
    pub card: Step,
    pub detail_link: Step,
    /// Searched inside the detail link.
    pub info: Step,
    pub name: FieldPath,
    pub address: FieldPath,
    pub rating: FieldPath,
    /// Searched inside the card. `None` drops the Gender column.
    pub badge: Option<FieldPath>,
    pub services: Option<ServiceSelectors>,
    pub opening_hours_row: Step,
    pub opening_hours_day: FieldPath,
    pub opening_hours_range: FieldPath,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            results_root: Step::classed("div", &["ts_bNq"]),
            card: Step::classed("div", &["paUULP", "Z1aKNU"]),
            detail_link: Step::classed("a", &["OP1nBW", "KzVzOx"]),
            info: Step::classed("div", &["nd2h5g"]),
            name: vec![Step::classed("p", &["axDOAG", "zL1l9a", "deeUT2", "NH5kAF"])].into(),
            address: vec![Step::classed("p", &["axDOAG", "TE8kwS", "DbgFmO", "deeUT2"])].into(),
            rating: vec![Step::classed(
                "p",
                &["axDOAG", "VH00E7", "eGBYyp", "SycVRT", "tWrves"],
            )]
            .into(),
            badge: Some(vec![Step::classed("div", &["Vc5Ps1"])].into()),
            services: Some(ServiceSelectors {
                list: vec![Step::classed("ul", &["HSm7QR"])].into(),
                item: Step::classed("li", &["zwLQ3F"]),
                name: vec![Step::classed("p", &["axDOAG", "deeUT2", "wWy3dW"])].into(),
                price: vec![Step::classed("p", &["axDOAG", "deeUT2", "e4rbA0"])].into(),
            }),
            opening_hours_row: Step::marked("div", "data-qa", "opening-hours-row"),
            opening_hours_day: vec![Step::marked("p", "data-qa", "opening-hours-day")].into(),
            opening_hours_range: vec![Step::marked("p", "data-qa", "opening-hours-range")].into(),
        }
    }
}

impl SelectorTable {
    /// Loads a table from JSON. Keys left out keep their default value.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ScrapeError::Config(format!("selector table {}: {e}", path.display()))
        })
    }

    pub fn compile(&self) -> Result<CompiledSelectors> {
        let services = match &self.services {
            Some(s) => Some(CompiledServices {
                list: s.list.compile()?,
                item: s.item.compile()?,
                name: s.name.compile()?,
                price: s.price.compile()?,
            }),
            None => None,
        };
        Ok(CompiledSelectors {
            results_root: self.results_root.compile()?,
            card: self.card.compile()?,
            detail_link: self.detail_link.compile()?,
            info: self.info.compile()?,
            name: self.name.compile()?,
            address: self.address.compile()?,
            rating: self.rating.compile()?,
            badge: self.badge.as_ref().map(FieldPath::compile).transpose()?,
            services,
            opening_hours_row: self.opening_hours_row.compile()?,
            opening_hours_day: self.opening_hours_day.compile()?,
            opening_hours_range: self.opening_hours_range.compile()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledServices {
    pub list: CompiledPath,
    pub item: Selector,
    pub name: CompiledPath,
    pub price: CompiledPath,
}

/// [`SelectorTable`] with every step parsed into a [`Selector`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub results_root: Selector,
    pub card: Selector,
    pub detail_link: Selector,
    pub info: Selector,
    pub name: CompiledPath,
    pub address: CompiledPath,
    pub rating: CompiledPath,
    pub badge: Option<CompiledPath>,
    pub services: Option<CompiledServices>,
    pub opening_hours_row: Selector,
    pub opening_hours_day: CompiledPath,
    pub opening_hours_range: CompiledPath,
}
