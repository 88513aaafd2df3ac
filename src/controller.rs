use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent,
    ScrollLogicalPosition, TouchEvent, Window,
};

use crate::anchors;
use crate::components::demo_modal::ModalHost;
use crate::components::notification::{Notifier, ToastKind};
use crate::config::PageConfig;
use crate::contact::{self, ContactSubmission};
use crate::counter;
use crate::demo::{DemoCatalog, UnknownDemo, DEMO_ATTR};
use crate::dom;
use crate::effects;
use crate::error::Result;
use crate::nav::{NavElements, NavMenu};
use crate::reveal::{self, VisibilityObserver};
use crate::scroll::{scroll_progress, NavbarStyle, ProgressBar};
use crate::search::{self, Highlighter};
use crate::swipe::SwipeTracker;
use crate::timing::Ticker;
use crate::tooltip;

/// Owns every handler attached to the page.
pub struct PageController {
    window: Window,
    document: Document,
    body: HtmlElement,
    config: PageConfig,
    catalog: DemoCatalog,
    notifier: Notifier,
    modals: ModalHost,
    nav: NavMenu,
    swipe: SwipeTracker,
    highlighter: Highlighter,
    listeners: RefCell<Vec<EventListener>>,
    observers: RefCell<Vec<VisibilityObserver>>,
    counters: RefCell<Vec<Ticker>>,
}

impl PageController {
    pub fn new(window: Window, document: Document, config: PageConfig) -> Result<Rc<Self>> {
        let body = dom::body(&document)?;
        let catalog = DemoCatalog::builtin()?;
        Ok(Rc::new(Self {
            notifier: Notifier::new(document.clone(), config.toast),
            modals: ModalHost::new(document.clone(), config.modal),
            nav: NavMenu::default(),
            swipe: SwipeTracker::new(config.swipe_threshold),
            highlighter: Highlighter::new(
                config.search_highlight_color.clone(),
                config.search_highlight_ms,
            ),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            counters: RefCell::new(Vec::new()),
            window,
            document,
            body,
            config,
            catalog,
        }))
    }

    pub fn install(self: &Rc<Self>) {
        self.install_nav();
        self.install_scroll_effects();
        self.install_anchor_links();
        self.install_reveal();
        self.install_counters();
        self.install_contact_form();
        self.install_tooltips();
        self.install_search();
        self.install_demo_buttons();
        self.install_touch();
        self.install_decorations();
        log::info!("page controller installed ({} listeners)", self.listeners.borrow().len());
    }

    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn install_nav(self: &Rc<Self>) {
        let selectors = &self.config.selectors;
        let (Some(hamburger), Some(menu)) = (
            dom::query(&self.document, &selectors.hamburger),
            dom::query(&self.document, &selectors.nav_menu),
        ) else {
            log::debug!("no navigation menu on this page");
            return;
        };
        let elements = Rc::new(NavElements { hamburger, menu });

        let view = Rc::clone(self);
        let nav = elements.clone();
        self.listen(EventListener::new(elements.hamburger.as_ref(), "click", move |_| {
            view.nav.toggle();
            nav.render(&view.nav);
        }));

        for link in dom::query_all(&self.document, &selectors.nav_link) {
            let view = Rc::clone(self);
            let nav = elements.clone();
            self.listen(EventListener::new(link.as_ref(), "click", move |_| {
                view.nav.close();
                nav.render(&view.nav);
            }));
        }

        let view = Rc::clone(self);
        self.listen(EventListener::new(self.document.as_ref(), "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" {
                view.nav.close();
                elements.render(&view.nav);
            }
        }));
    }

    fn install_scroll_effects(self: &Rc<Self>) {
        let navbar = dom::query(&self.document, &self.config.selectors.navbar);
        let progress = match ProgressBar::inject(&self.document) {
            Ok(bar) => Some(bar),
            Err(e) => {
                log::warn!("scroll progress bar unavailable: {}", e);
                None
            }
        };

        let view = Rc::clone(self);
        let update = move || {
            let offset = view.window.scroll_y().unwrap_or(0.0);
            if let Some(navbar) = &navbar {
                NavbarStyle::for_offset(offset, view.config.navbar_scroll_threshold).apply(navbar);
            }
            if let Some(bar) = &progress {
                let document_height = view.body.offset_height() as f64;
                let viewport = dom::viewport_height(&view.window);
                bar.set_percent(scroll_progress(offset, document_height, viewport));
            }
        };
        update();

        self.listen(EventListener::new(self.window.as_ref(), "scroll", move |_| update()));
    }

    fn install_anchor_links(self: &Rc<Self>) {
        for anchor in dom::query_all(&self.document, &self.config.selectors.anchors) {
            let document = self.document.clone();
            let link = anchor.clone();
            self.listen(EventListener::new_with_options(
                anchor.as_ref(),
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let href = link.get_attribute("href").unwrap_or_default();
                    let target = anchors::fragment_id(&href).and_then(|id| document.get_element_by_id(id));
                    match target {
                        Some(target) => dom::smooth_scroll_to(&target, ScrollLogicalPosition::Start),
                        None => log::debug!("anchor {:?} has no target", href),
                    }
                },
            ));
        }
    }

    fn install_reveal(self: &Rc<Self>) {
        let settings = &self.config.reveal;
        let elements = dom::query_all(&self.document, &self.config.selectors.revealed);
        if elements.is_empty() {
            return;
        }
        match reveal::reveal_on_scroll(
            &elements,
            settings.threshold,
            &settings.root_margin,
            settings.class.clone(),
        ) {
            Ok(observer) => self.observers.borrow_mut().push(observer),
            Err(e) => log::warn!("reveal animations unavailable: {}", e),
        }
    }

    fn install_counters(self: &Rc<Self>) {
        let Some(section) = dom::query(&self.document, &self.config.selectors.statistics) else {
            return;
        };
        let view = Rc::clone(self);
        match reveal::once_visible(&section, self.config.stats_threshold, move || view.start_counters()) {
            Ok(observer) => self.observers.borrow_mut().push(observer),
            Err(e) => log::warn!("counter animation unavailable: {}", e),
        }
    }

    fn start_counters(&self) {
        let elements = dom::query_all(&self.document, &self.config.selectors.counters);
        log::debug!("animating {} counters", elements.len());
        let mut counters = self.counters.borrow_mut();
        counters.extend(
            elements
                .into_iter()
                .filter_map(|element| counter::animate(element, self.config.counter)),
        );
    }

    fn install_contact_form(self: &Rc<Self>) {
        if let Some(form) = dom::query(&self.document, &self.config.selectors.contact_form) {
            let notifier = self.notifier.clone();
            let submitted = form.clone();
            self.listen(EventListener::new_with_options(
                form.as_ref(),
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let feedback = ContactSubmission::read(&submitted).evaluate();
                    notifier.show(feedback.message, feedback.kind);
                    if feedback.reset_form {
                        contact::reset(&submitted);
                    }
                },
            ));
        }

        // Enter inside any form input submits that form.
        self.listen(EventListener::new_with_options(
            self.document.as_ref(),
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            |event: &Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if !contact::submits_on_key(&key.key()) {
                    return;
                }
                let Some(form) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .and_then(|input| input.form())
                else {
                    return;
                };
                event.prevent_default();
                if let Err(e) = contact::dispatch_submit(&form) {
                    log::warn!("form submit failed: {}", e);
                }
            },
        ));
    }

    fn install_tooltips(self: &Rc<Self>) {
        for anchor in dom::query_all(&self.document, &self.config.selectors.tooltip) {
            for listener in tooltip::attach(&self.document, &anchor) {
                self.listen(listener);
            }
        }
    }

    fn install_search(self: &Rc<Self>) {
        let selectors = &self.config.selectors;
        let (Some(input), Some(button)) = (
            self.document
                .get_element_by_id(&selectors.search_input_id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
            dom::query(&self.document, &selectors.search_button),
        ) else {
            log::debug!("no search box on this page");
            return;
        };

        let view = Rc::clone(self);
        let query_input = input.clone();
        self.listen(EventListener::new(button.as_ref(), "click", move |_| {
            view.perform_search(&query_input.value());
        }));

        let view = Rc::clone(self);
        let query_input = input.clone();
        self.listen(EventListener::new(input.as_ref(), "keypress", move |event: &Event| {
            let is_enter = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |key| key.key() == "Enter");
            if is_enter {
                view.perform_search(&query_input.value());
            }
        }));
    }

    /// Highlights text matching `raw`; shows an error toast when nothing matches.
    pub fn perform_search(&self, raw: &str) -> Option<search::SearchOutcome> {
        let query = search::normalize_query(raw)?;
        let candidates = dom::query_all(&self.document, &self.config.selectors.searchable);
        let outcome = self.highlighter.search(&candidates, &query);
        log::debug!("search {:?}: {} matches", query, outcome.matches);
        if !outcome.found() {
            self.notifier.show(search::NOT_FOUND_MESSAGE, ToastKind::Error);
        }
        Some(outcome)
    }

    fn install_demo_buttons(self: &Rc<Self>) {
        for button in dom::query_all(&self.document, &self.config.selectors.demo_button) {
            let view = Rc::clone(self);
            let clicked = button.clone();
            self.listen(EventListener::new(button.as_ref(), "click", move |_| {
                let demo = clicked.get_attribute(DEMO_ATTR).unwrap_or_default();
                view.show_demo(&demo);
            }));
        }
    }

    /// Opens the modal for `demo`. Unknown ids are ignored.
    pub fn show_demo(&self, demo: &str) {
        let descriptor = match self.catalog.lookup(demo) {
            Ok(descriptor) => descriptor,
            Err(UnknownDemo(name)) => {
                log::debug!("no demo named {:?}", name);
                return;
            }
        };
        if let Err(e) = self.modals.open(descriptor) {
            log::warn!("could not open demo modal: {}", e);
        }
    }

    fn install_touch(self: &Rc<Self>) {
        let view = Rc::clone(self);
        self.listen(EventListener::new(self.document.as_ref(), "touchstart", move |event: &Event| {
            if let Some(y) = first_touch_y(event) {
                view.swipe.begin(y);
            }
        }));

        let view = Rc::clone(self);
        self.listen(EventListener::new(self.document.as_ref(), "touchend", move |event: &Event| {
            let Some(y) = first_touch_y(event) else {
                return;
            };
            if let Some(direction) = view.swipe.finish(y) {
                gloo_console::log!(direction.label());
            }
        }));
    }

    fn install_decorations(self: &Rc<Self>) {
        for card in dom::query_all(&self.document, &self.config.selectors.hoverable) {
            for listener in effects::hover_lift(&card) {
                self.listen(listener);
            }
        }
        let floating: Vec<Element> = dom::query_all(&self.document, &self.config.selectors.floating);
        effects::stagger_floating(&floating, self.config.float_stagger_secs);
        effects::fade_in_page(&self.body, self.config.page_fade_in_delay_ms);
    }
}

fn first_touch_y(event: &Event) -> Option<i32> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(touch.screen_y())
}
