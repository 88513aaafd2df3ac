use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlElement};

use crate::dom;

pub const LIFTED: &str = "translateY(-5px) scale(1.02)";
pub const RESTING: &str = "translateY(0) scale(1)";

/// `animation-delay` for the `index`-th floating element.
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    format!("{}s", index as f64 * step_secs)
}

pub fn stagger_floating(elements: &[Element], step_secs: f64) {
    for (index, element) in elements.iter().enumerate() {
        dom::set_style(element, "animation-delay", &stagger_delay(index, step_secs));
    }
}

pub fn hover_lift(card: &Element) -> [EventListener; 2] {
    let lifted = card.clone();
    let enter = EventListener::new(card.as_ref(), "mouseenter", move |_| {
        dom::set_style(&lifted, "transform", LIFTED);
    });
    let rested = card.clone();
    let leave = EventListener::new(card.as_ref(), "mouseleave", move |_| {
        dom::set_style(&rested, "transform", RESTING);
    });
    [enter, leave]
}

pub const PAGE_FADE: &str = "opacity 0.5s ease";

/// Fades the whole page in shortly after startup.
pub fn fade_in_page(body: &HtmlElement, delay_ms: u32) {
    dom::set_style(body, "opacity", "0");
    dom::set_style(body, "transition", PAGE_FADE);
    let body = body.clone();
    Timeout::new(delay_ms, move || dom::set_style(&body, "opacity", "1")).forget();
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    async fn page_starts_hidden_then_fades_in() {
        let document = dom::document().unwrap();
        let page = dom::append_div(&document, "", "").unwrap();

        fade_in_page(&page, 10);
        let style = page.style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "0");
        assert!(style.get_property_value("transition").unwrap().starts_with("opacity 0.5s"));

        TimeoutFuture::new(50).await;
        assert_eq!(style.get_property_value("opacity").unwrap(), "1");
        page.remove();
    }
}
