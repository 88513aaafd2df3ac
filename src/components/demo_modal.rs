use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::yew::styled_component;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement};
use yew::prelude::*;
use yew::AppHandle;

use crate::config::ModalTiming;
use crate::demo::DemoDescriptor;
use crate::dom;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Opening,
    Open,
    Closing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// The timer started when the modal entered this phase has fired.
    Elapsed(ModalPhase),
    Close,
}

impl ModalPhase {
    pub fn step(self, event: ModalEvent) -> Self {
        match (self, event) {
            (ModalPhase::Opening, ModalEvent::Elapsed(ModalPhase::Opening)) => ModalPhase::Open,
            (ModalPhase::Closing, ModalEvent::Elapsed(ModalPhase::Closing)) => ModalPhase::Closed,
            (ModalPhase::Opening | ModalPhase::Open, ModalEvent::Close) => ModalPhase::Closing,
            (phase, _) => phase,
        }
    }

    pub fn delay_ms(self, timing: &ModalTiming) -> Option<u32> {
        match self {
            ModalPhase::Opening => Some(timing.enter_delay_ms),
            ModalPhase::Closing => Some(timing.fade_ms),
            ModalPhase::Open | ModalPhase::Closed => None,
        }
    }

    pub fn is_shown(self) -> bool {
        self == ModalPhase::Open
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ModalState {
    phase: ModalPhase,
}

impl Reducible for ModalState {
    type Action = ModalEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let phase = self.phase.step(action);
        if phase == self.phase {
            self
        } else {
            Rc::new(ModalState { phase })
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DemoModalProps {
    pub demo: &'static DemoDescriptor,
    pub timing: ModalTiming,
    pub on_closed: Callback<()>,
}

#[styled_component(DemoModal)]
pub fn demo_modal(props: &DemoModalProps) -> Html {
    let state = use_reducer(|| ModalState { phase: ModalPhase::Opening });
    let scrim_ref = use_node_ref();

    {
        let dispatcher = state.dispatcher();
        let on_closed = props.on_closed.clone();
        let timing = props.timing;
        use_effect_with_deps(
            move |phase: &ModalPhase| {
                let phase = *phase;
                if phase == ModalPhase::Closed {
                    on_closed.emit(());
                } else if let Some(delay) = phase.delay_ms(&timing) {
                    Timeout::new(delay, move || dispatcher.dispatch(ModalEvent::Elapsed(phase)))
                        .forget();
                }
                || ()
            },
            state.phase,
        );
    }

    let close = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ModalEvent::Close))
    };

    let on_scrim_click = {
        let dispatcher = state.dispatcher();
        let scrim_ref = scrim_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let clicked = e.target_dyn_into::<Element>();
            if clicked.is_some() && clicked == scrim_ref.cast::<Element>() {
                dispatcher.dispatch(ModalEvent::Close);
            }
        })
    };

    let shown = state.phase.is_shown();
    let scrim_style = format!("opacity: {};", if shown { "1" } else { "0" });
    let content_style = format!("transform: scale({});", if shown { "1" } else { "0.8" });
    let demo = props.demo;

    html! {
        <div
            ref={scrim_ref}
            class={classes!(css!(r#"
                position: fixed;
                top: 0;
                left: 0;
                width: 100%;
                height: 100%;
                background: rgba(0, 0, 0, 0.5);
                display: flex;
                justify-content: center;
                align-items: center;
                z-index: 10000;
                transition: opacity 0.3s ease;
            "#), "demo-modal")}
            style={scrim_style}
            onclick={on_scrim_click}
        >
            <div
                class={classes!(css!(r#"
                    background: white;
                    border-radius: 15px;
                    padding: 30px;
                    max-width: 500px;
                    width: 90%;
                    max-height: 80vh;
                    overflow-y: auto;
                    transition: transform 0.3s ease;
                "#), "demo-modal-content")}
                style={content_style}
                role="dialog"
                aria-modal="true"
            >
                <div class="demo-modal-header">
                    <h3>{ demo.title }</h3>
                    <button class="demo-modal-close" onclick={close}>{ "×" }</button>
                </div>
                <div class="demo-modal-body">
                    <p>{ demo.body }</p>
                    <div class="demo-features">
                        <h4>{ "Key features:" }</h4>
                        <ul>
                            { for demo.features.iter().map(|feature| html! { <li>{ *feature }</li> }) }
                        </ul>
                    </div>
                    <div class="demo-actions">
                        <button class="btn btn-primary">{ "Start demo" }</button>
                        <button class="btn btn-secondary">{ "Learn more" }</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

struct ActiveModal {
    id: u64,
    app: AppHandle<DemoModal>,
    host: HtmlElement,
}

impl ActiveModal {
    fn teardown(self) {
        self.app.destroy();
        self.host.remove();
    }
}

/// Keeps at most one demo modal mounted.
#[derive(Clone)]
pub struct ModalHost {
    document: Document,
    timing: ModalTiming,
    active: Rc<RefCell<Option<ActiveModal>>>,
    next_id: Rc<Cell<u64>>,
}

impl ModalHost {
    pub fn new(document: Document, timing: ModalTiming) -> Self {
        Self {
            document,
            timing,
            active: Rc::default(),
            next_id: Rc::default(),
        }
    }

    /// Opens `demo`, replacing any modal that is already showing.
    pub fn open(&self, demo: &'static DemoDescriptor) -> Result<()> {
        self.dismiss();

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let host = dom::append_div(&self.document, "demo-modal-host", "")?;

        let on_closed = {
            let active = self.active.clone();
            Callback::from(move |_: ()| {
                let finished = {
                    let mut slot = active.borrow_mut();
                    match slot.as_ref() {
                        Some(modal) if modal.id == id => slot.take(),
                        _ => None,
                    }
                };
                if let Some(modal) = finished {
                    spawn_local(async move { modal.teardown() });
                }
            })
        };

        let props = DemoModalProps {
            demo,
            timing: self.timing,
            on_closed,
        };
        let app = yew::Renderer::<DemoModal>::with_root_and_props(host.clone().into(), props).render();
        *self.active.borrow_mut() = Some(ActiveModal { id, app, host });
        log::debug!("opened demo modal {}", demo.id.as_str());
        Ok(())
    }

    /// Removes the active modal immediately, without the fade-out.
    pub fn dismiss(&self) {
        let active = self.active.borrow_mut().take();
        if let Some(modal) = active {
            modal.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_enter_delay() {
        let phase = ModalPhase::Opening;
        assert_eq!(phase.delay_ms(&ModalTiming::default()), Some(10));
        assert_eq!(phase.step(ModalEvent::Elapsed(ModalPhase::Opening)), ModalPhase::Open);
        assert!(ModalPhase::Open.is_shown());
        assert!(!ModalPhase::Opening.is_shown());
    }

    #[test]
    fn close_fades_then_finishes() {
        let closing = ModalPhase::Open.step(ModalEvent::Close);
        assert_eq!(closing, ModalPhase::Closing);
        assert_eq!(closing.delay_ms(&ModalTiming::default()), Some(300));
        assert_eq!(closing.step(ModalEvent::Elapsed(ModalPhase::Closing)), ModalPhase::Closed);
    }

    #[test]
    fn close_during_entry_is_not_undone_by_entry_timer() {
        let phase = ModalPhase::Opening.step(ModalEvent::Close);
        assert_eq!(phase, ModalPhase::Closing);
        let phase = phase.step(ModalEvent::Elapsed(ModalPhase::Opening));
        assert_eq!(phase, ModalPhase::Closing);
    }

    #[test]
    fn repeated_close_is_idempotent() {
        let phase = ModalPhase::Closing.step(ModalEvent::Close);
        assert_eq!(phase, ModalPhase::Closing);
        assert_eq!(ModalPhase::Closed.step(ModalEvent::Close), ModalPhase::Closed);
    }

    #[test]
    fn open_and_closed_have_no_timer() {
        let timing = ModalTiming::default();
        assert_eq!(ModalPhase::Open.delay_ms(&timing), None);
        assert_eq!(ModalPhase::Closed.delay_ms(&timing), None);
    }
}
