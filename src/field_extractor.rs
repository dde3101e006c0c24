use scraper::{ElementRef, Selector};

use crate::{
    selectors::CompiledPath,
    text_manipulators::{extract_text, normalize_text},
    venue::NOT_AVAILABLE,
};

/// Follows `path` down from `fragment`, taking the first match at each step.
pub fn find_path<'a>(fragment: ElementRef<'a>, path: &CompiledPath) -> Option<ElementRef<'a>> {
    path.0
        .iter()
        .try_fold(fragment, |node, selector| node.select(selector).next())
}

pub fn find_first<'a>(fragment: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    fragment.select(selector).next()
}

/// Normalised text at the end of `path`, or [`NOT_AVAILABLE`] when any step
/// finds nothing.
pub fn extract(fragment: ElementRef, path: &CompiledPath) -> String {
    find_path(fragment, path)
        .map(|node| normalize_text(&extract_text(node)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Like [`extract`] but keeps `None` for a missing fragment.
pub fn extract_opt(fragment: ElementRef, path: &CompiledPath) -> Option<String> {
    find_path(fragment, path).map(|node| normalize_text(&extract_text(node)))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::selectors::{FieldPath, Step};

    fn path(steps: Vec<Step>) -> CompiledPath {
        FieldPath(steps).compile().unwrap()
    }

    #[test]
    fn follows_nested_steps() {
        let html = Html::parse_fragment(
            r#"<div class="info"><p class="other">skip</p>
               <section class="box"><p class="name x">  Glow&nbsp;Spa </p></section></div>"#,
        );
        let p = path(vec![
            Step::classed("section", &["box"]),
            Step::classed("p", &["name"]),
        ]);
        assert_eq!(extract(html.root_element(), &p), "Glow Spa");
    }

    #[test]
    fn missing_step_yields_sentinel() {
        let html = Html::parse_fragment(r#"<div><p class="name">Glow</p></div>"#);
        let p = path(vec![
            Step::classed("section", &["box"]),
            Step::classed("p", &["name"]),
        ]);
        assert_eq!(extract(html.root_element(), &p), NOT_AVAILABLE);
        assert_eq!(extract_opt(html.root_element(), &p), None);
    }

    #[test]
    fn first_match_wins_and_is_repeatable() {
        let html = Html::parse_fragment(
            r#"<div><p data-qa="d">Monday</p><p data-qa="d">Tuesday</p></div>"#,
        );
        let p = path(vec![Step::marked("p", "data-qa", "d")]);
        let first = extract(html.root_element(), &p);
        assert_eq!(first, "Monday");
        assert_eq!(extract(html.root_element(), &p), first);
    }
}
