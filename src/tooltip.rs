use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::error::Result;

pub const TOOLTIP_ATTR: &str = "data-tooltip";

const TOOLTIP_CSS: &str = "position: absolute; background: #1f2937; color: white; \
    padding: 8px 12px; border-radius: 6px; font-size: 14px; z-index: 1000; \
    pointer-events: none; white-space: nowrap;";

/// Gap between the tooltip and the top edge of its anchor.
const GAP_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

/// Document coordinates (left, top) that centre a `tip_width` x `tip_height`
/// label above `anchor`. `anchor` is in viewport coordinates.
pub fn tooltip_origin(
    anchor: AnchorRect,
    tip_width: f64,
    tip_height: f64,
    scroll: (f64, f64),
) -> (f64, f64) {
    let left = anchor.left + anchor.width / 2.0 - tip_width / 2.0 + scroll.0;
    let top = anchor.top - tip_height - GAP_PX + scroll.1;
    (left, top)
}

/// Wires hover tooltips onto one `[data-tooltip]` element.
pub fn attach(document: &Document, anchor: &Element) -> Vec<EventListener> {
    let shown: Rc<RefCell<Option<HtmlElement>>> = Rc::new(RefCell::new(None));

    let on_enter = {
        let document = document.clone();
        let shown = shown.clone();
        let hovered = anchor.clone();
        EventListener::new(anchor.as_ref(), "mouseenter", move |_| {
            if let Some(old) = shown.borrow_mut().take() {
                old.remove();
            }
            let text = hovered.get_attribute(TOOLTIP_ATTR).unwrap_or_default();
            match show(&document, &hovered, &text) {
                Ok(tip) => *shown.borrow_mut() = Some(tip),
                Err(e) => log::warn!("tooltip failed: {}", e),
            }
        })
    };

    let on_leave = EventListener::new(anchor.as_ref(), "mouseleave", move |_| {
        if let Some(tip) = shown.borrow_mut().take() {
            tip.remove();
        }
    });

    vec![on_enter, on_leave]
}

fn show(document: &Document, anchor: &Element, text: &str) -> Result<HtmlElement> {
    mount_tip(document, text, |tip| position(tip, anchor))
}

/// Appends a tooltip node and places it with `place`. The node is removed
/// again if placing it fails.
fn mount_tip(
    document: &Document,
    text: &str,
    place: impl FnOnce(&HtmlElement) -> Result<()>,
) -> Result<HtmlElement> {
    let tip = dom::append_div(document, "tooltip", TOOLTIP_CSS)?;
    tip.set_text_content(Some(text));
    match place(&tip) {
        Ok(()) => Ok(tip),
        Err(e) => {
            tip.remove();
            Err(e)
        }
    }
}

fn position(tip: &HtmlElement, anchor: &Element) -> Result<()> {
    let rect = anchor.get_bounding_client_rect();
    let window = dom::window()?;
    let scroll = (window.scroll_x()?, window.scroll_y()?);
    let (left, top) = tooltip_origin(
        AnchorRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
        },
        tip.offset_width() as f64,
        tip.offset_height() as f64,
        scroll,
    );
    let style = tip.style();
    style.set_property("left", &format!("{}px", left))?;
    style.set_property("top", &format!("{}px", top))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_above_anchor() {
        let anchor = AnchorRect { left: 100.0, top: 200.0, width: 80.0 };
        assert_eq!(tooltip_origin(anchor, 40.0, 30.0, (0.0, 0.0)), (120.0, 160.0));
    }

    #[test]
    fn accounts_for_page_scroll() {
        let anchor = AnchorRect { left: 0.0, top: 50.0, width: 100.0 };
        assert_eq!(tooltip_origin(anchor, 100.0, 20.0, (5.0, 400.0)), (5.0, 420.0));
    }

    #[test]
    fn wide_label_can_overhang_left() {
        let anchor = AnchorRect { left: 10.0, top: 100.0, width: 20.0 };
        let (left, _) = tooltip_origin(anchor, 200.0, 20.0, (0.0, 0.0));
        assert_eq!(left, -80.0);
    }
}
