use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use web_sys::{Element, ScrollLogicalPosition};

use crate::dom;

pub const NOT_FOUND_MESSAGE: &str = "No matching content found";

/// Lowercased, trimmed query; `None` when there is nothing to search for.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    (!query.is_empty()).then_some(query)
}

/// Indices of the texts containing `query`, ignoring case.
/// `query` must already be normalized.
pub fn find_matches<'a, I>(texts: I, query: &str) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .enumerate()
        .filter(|(_, text)| text.to_lowercase().contains(query))
        .map(|(index, _)| index)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub matches: usize,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.matches > 0
    }
}

/// Highlights matching elements and clears them after a delay.
pub struct Highlighter {
    color: String,
    duration_ms: u32,
    highlighted: RefCell<Vec<Element>>,
    pending: RefCell<Vec<Timeout>>,
}

impl Highlighter {
    pub fn new(color: String, duration_ms: u32) -> Self {
        Self {
            color,
            duration_ms,
            highlighted: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Runs `query` over `candidates`. The first match is scrolled to the
    /// centre of the viewport; every match is highlighted.
    pub fn search(&self, candidates: &[Element], query: &str) -> SearchOutcome {
        self.clear();

        let texts: Vec<String> = candidates
            .iter()
            .map(|el| el.text_content().unwrap_or_default())
            .collect();
        let hits = find_matches(texts.iter().map(String::as_str), query);

        let matched: Vec<Element> = hits.iter().map(|&i| candidates[i].clone()).collect();
        for element in &matched {
            dom::set_style(element, "background-color", &self.color);
            let element = element.clone();
            self.pending.borrow_mut().push(Timeout::new(self.duration_ms, move || {
                dom::set_style(&element, "background-color", "");
            }));
        }
        if let Some(first) = matched.first() {
            dom::smooth_scroll_to(first, ScrollLogicalPosition::Center);
        }

        let outcome = SearchOutcome { matches: matched.len() };
        *self.highlighted.borrow_mut() = matched;
        outcome
    }

    /// Cancels pending reverts and removes highlights from the last search.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
        for element in self.highlighted.borrow_mut().drain(..) {
            dom::set_style(&element, "background-color", "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed_and_lowercased() {
        assert_eq!(normalize_query("  Hello "), Some("hello".to_string()));
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(""), None);
    }

    #[test]
    fn matches_ignore_case() {
        let page = ["Hello World", "Materials science", "Contact us"];
        let query = normalize_query("hello").unwrap();
        let hits = find_matches(page, &query);
        assert_eq!(hits, vec![0]);
        assert!(SearchOutcome { matches: hits.len() }.found());
    }

    #[test]
    fn every_matching_text_is_reported_in_order() {
        let page = ["Protein structure", "Intro", "structure prediction", "STRUCTURE"];
        assert_eq!(find_matches(page, "structure"), vec![0, 2, 3]);
    }

    #[test]
    fn miss_reports_not_found() {
        let page = ["Hello World", "Quantum chemistry"];
        let hits = find_matches(page, "zzz");
        assert!(hits.is_empty());
        assert!(!SearchOutcome { matches: hits.len() }.found());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::HtmlElement;

    use super::*;

    fn background(element: &Element) -> String {
        element
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("background-color")
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn clear_restores_background() {
        let document = dom::document().unwrap();
        let hit: Element = dom::append_div(&document, "", "").unwrap().into();
        hit.set_text_content(Some("Protein structure"));
        let miss: Element = dom::append_div(&document, "", "").unwrap().into();
        miss.set_text_content(Some("Intro"));

        let highlighter = Highlighter::new("rgb(255, 243, 205)".to_string(), 2000);
        let outcome = highlighter.search(&[hit.clone(), miss.clone()], "structure");
        assert_eq!(outcome.matches, 1);
        assert_eq!(background(&hit), "rgb(255, 243, 205)");
        assert_eq!(background(&miss), "");

        highlighter.clear();
        assert_eq!(background(&hit), "");

        hit.remove();
        miss.remove();
    }
}
