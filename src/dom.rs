use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::error::{PageError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub fn body(document: &Document) -> Result<HtmlElement> {
    document.body().ok_or(PageError::NoBody)
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("bad selector {:?}: {:?}", selector, e);
            None
        }
    }
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("bad selector {:?}: {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            log::warn!("failed to set {}: {:?}", property, e);
        }
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        log::warn!("failed to toggle class {}: {:?}", class, e);
    }
}

pub fn smooth_scroll_to(element: &Element, block: ScrollLogicalPosition) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Creates a `div`, applies inline css, and appends it to `<body>`.
pub fn append_div(document: &Document, class: &str, css: &str) -> Result<HtmlElement> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PageError::Js("created div is not an HtmlElement".to_string()))?;
    element.set_class_name(class);
    element.style().set_css_text(css);
    body(document)?.append_child(&element)?;
    Ok(element)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}
