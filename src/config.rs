use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::{PageError, Result};

/// Id of the optional inline JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Scroll offset (px) past which the navbar turns opaque.
    pub navbar_scroll_threshold: f64,
    /// Minimum vertical travel (px) for a touch to count as a swipe.
    pub swipe_threshold: i32,
    pub reveal: RevealConfig,
    pub stats_threshold: f64,
    pub counter: CounterTiming,
    pub toast: ToastTiming,
    pub modal: ModalTiming,
    pub search_highlight_ms: u32,
    pub search_highlight_color: String,
    pub float_stagger_secs: f64,
    pub page_fade_in_delay_ms: u32,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: 100.0,
            swipe_threshold: 50,
            reveal: RevealConfig::default(),
            stats_threshold: 0.5,
            counter: CounterTiming::default(),
            toast: ToastTiming::default(),
            modal: ModalTiming::default(),
            search_highlight_ms: 2000,
            search_highlight_color: "rgba(37, 99, 235, 0.1)".to_string(),
            float_stagger_secs: 0.5,
            page_fade_in_delay_ms: 100,
            selectors: Selectors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            class: "fade-in-up".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterTiming {
    pub duration_ms: u32,
    pub tick_ms: u32,
}

impl Default for CounterTiming {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            tick_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastTiming {
    pub show_delay_ms: u32,
    /// Time from creation until the slide-out starts.
    pub display_ms: u32,
    pub fade_ms: u32,
    pub top_px: f64,
    pub right_px: f64,
    /// Vertical distance between stacked toasts.
    pub spacing_px: f64,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            display_ms: 3000,
            fade_ms: 300,
            top_px: 100.0,
            right_px: 20.0,
            spacing_px: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModalTiming {
    pub enter_delay_ms: u32,
    pub fade_ms: u32,
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            fade_ms: 300,
        }
    }
}

/// CSS selectors for the markup this crate attaches to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub hamburger: String,
    pub nav_menu: String,
    pub nav_link: String,
    pub navbar: String,
    pub anchors: String,
    pub revealed: String,
    pub hoverable: String,
    pub statistics: String,
    pub counters: String,
    pub contact_form: String,
    pub search_input_id: String,
    pub search_button: String,
    pub searchable: String,
    pub demo_button: String,
    pub tooltip: String,
    pub floating: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hamburger: ".hamburger".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_link: ".nav-link".to_string(),
            navbar: ".navbar".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            revealed: ".feature, .app-card, .tech-item".to_string(),
            hoverable: ".app-card, .tech-item, .feature".to_string(),
            statistics: ".statistics".to_string(),
            counters: ".stat-number".to_string(),
            contact_form: ".contact-form form".to_string(),
            search_input_id: "search-input".to_string(),
            search_button: ".search-btn".to_string(),
            searchable: "h1, h2, h3, p, li".to_string(),
            demo_button: ".demo-btn".to_string(),
            tooltip: "[data-tooltip]".to_string(),
            floating: ".element".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from `<script type="application/json" id="page-config">`.
    /// Falls back to the defaults when the element is absent.
    pub fn from_document(document: &Document) -> Result<Self> {
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(element) => {
                let text = element.text_content().unwrap_or_default();
                Self::from_json(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.reveal.threshold) {
            return Err(PageError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if !unit.contains(&self.stats_threshold) {
            return Err(PageError::InvalidConfig(format!(
                "stats_threshold must be within [0, 1], got {}",
                self.stats_threshold
            )));
        }
        if self.counter.tick_ms == 0 || self.counter.duration_ms == 0 {
            return Err(PageError::InvalidConfig(
                "counter duration and tick must be non-zero".to_string(),
            ));
        }
        if self.navbar_scroll_threshold < 0.0 || self.swipe_threshold < 0 {
            return Err(PageError::InvalidConfig(
                "scroll and swipe thresholds must not be negative".to_string(),
            ));
        }
        if self.toast.spacing_px < 0.0 {
            return Err(PageError::InvalidConfig(
                "toast.spacing_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behaviour() {
        let config = PageConfig::default();
        assert_eq!(config.navbar_scroll_threshold, 100.0);
        assert_eq!(config.swipe_threshold, 50);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.tick_ms, 16);
        assert_eq!(config.toast.show_delay_ms, 100);
        assert_eq!(config.toast.display_ms + config.toast.fade_ms, 3300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = PageConfig::from_json(r#"{"swipe_threshold": 80, "toast": {"display_ms": 5000}}"#)
            .unwrap();
        assert_eq!(config.swipe_threshold, 80);
        assert_eq!(config.toast.display_ms, 5000);
        assert_eq!(config.toast.fade_ms, 300);
        assert_eq!(config.selectors.hamburger, ".hamburger");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PageError::ConfigParse(_)));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let err = PageConfig::from_json(r#"{"counter": {"tick_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, PageError::InvalidConfig(_)));
    }

    #[test]
    fn threshold_outside_unit_range_is_rejected() {
        assert!(PageConfig::from_json(r#"{"reveal": {"threshold": 1.5}}"#).is_err());
        assert!(PageConfig::from_json(r#"{"stats_threshold": -0.1}"#).is_err());
    }
}
