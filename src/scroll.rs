use web_sys::{Element, HtmlElement};

use crate::dom;

pub const PROGRESS_CLASS: &str = "scroll-progress";

const PROGRESS_CSS: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 3px; \
    background: linear-gradient(90deg, #2563eb, #7c3aed); z-index: 10001; \
    transition: width 0.1s ease;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    Translucent,
    Opaque,
}

impl NavbarStyle {
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            NavbarStyle::Opaque
        } else {
            NavbarStyle::Translucent
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NavbarStyle::Opaque => "rgba(255, 255, 255, 0.98)",
            NavbarStyle::Translucent => "rgba(255, 255, 255, 0.95)",
        }
    }

    pub fn box_shadow(self) -> &'static str {
        match self {
            NavbarStyle::Opaque => "0 2px 20px rgba(0, 0, 0, 0.1)",
            NavbarStyle::Translucent => "none",
        }
    }

    pub fn apply(self, navbar: &Element) {
        dom::set_style(navbar, "background", self.background());
        dom::set_style(navbar, "box-shadow", self.box_shadow());
    }
}

/// Percentage of the scrollable distance covered, clamped to `[0, 100]`.
/// A page that does not scroll reports 0.
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub struct ProgressBar {
    bar: HtmlElement,
}

impl ProgressBar {
    pub fn inject(document: &web_sys::Document) -> crate::error::Result<Self> {
        let bar = dom::append_div(document, PROGRESS_CLASS, PROGRESS_CSS)?;
        Ok(Self { bar })
    }

    pub fn set_percent(&self, percent: f64) {
        if let Err(e) = self.bar.style().set_property("width", &format!("{}%", percent)) {
            log::warn!("failed to update scroll progress: {:?}", e);
        }
    }
}
