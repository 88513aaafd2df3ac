use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` together with the closure it calls.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl VisibilityObserver {
    /// Calls `on_visible` for every observed element that starts intersecting.
    pub fn new<F>(threshold: f64, root_margin: Option<&str>, mut on_visible: F) -> Result<Self>
    where
        F: FnMut(&Element, &IntersectionObserver) + 'static,
    {
        let callback: ObserverCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible(&entry.target(), &observer);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Adds `class` to each element the first time it scrolls into view.
pub fn reveal_on_scroll(
    elements: &[Element],
    threshold: f64,
    root_margin: &str,
    class: String,
) -> Result<VisibilityObserver> {
    let observer = VisibilityObserver::new(threshold, Some(root_margin), move |target, _| {
        if let Err(e) = target.class_list().add_1(&class) {
            log::warn!("failed to reveal element: {:?}", e);
        }
    })?;
    for element in elements {
        observer.observe(element);
    }
    Ok(observer)
}

/// Runs `on_first_view` once, when `section` first becomes visible.
pub fn once_visible<F>(section: &Element, threshold: f64, on_first_view: F) -> Result<VisibilityObserver>
where
    F: Fn() + 'static,
{
    let latch = OnceLatch::default();
    let observer = VisibilityObserver::new(threshold, None, move |target, observer| {
        observer.unobserve(target);
        if latch.fire() {
            on_first_view();
        }
    })?;
    observer.observe(section);
    Ok(observer)
}

/// Returns `true` from `fire` exactly once.
#[derive(Debug, Default, Clone)]
pub struct OnceLatch {
    fired: Rc<Cell<bool>>,
}

impl OnceLatch {
    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }
}
