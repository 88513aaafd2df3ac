use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::yew::styled_component;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;
use yew::prelude::*;
use yew::AppHandle;

use crate::config::ToastTiming;
use crate::dom;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn color(self) -> &'static str {
        match self {
            ToastKind::Success => "#10b981",
            ToastKind::Error => "#ef4444",
            ToastKind::Info => "#3b82f6",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
    Removed,
}

impl ToastPhase {
    /// How long this phase lasts; `None` for the terminal phase.
    ///
    /// `display_ms` counts from creation, so the slide-in delay is part of it.
    pub fn delay_ms(self, timing: &ToastTiming) -> Option<u32> {
        match self {
            ToastPhase::Entering => Some(timing.show_delay_ms),
            ToastPhase::Visible => Some(timing.display_ms.saturating_sub(timing.show_delay_ms)),
            ToastPhase::Leaving => Some(timing.fade_ms),
            ToastPhase::Removed => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ToastPhase::Entering => ToastPhase::Visible,
            ToastPhase::Visible => ToastPhase::Leaving,
            ToastPhase::Leaving | ToastPhase::Removed => ToastPhase::Removed,
        }
    }

    pub fn transform(self) -> &'static str {
        match self {
            ToastPhase::Visible => "translateX(0)",
            _ => "translateX(100%)",
        }
    }
}

/// Vertical slots for toasts on screen. New toasts take the lowest free slot.
#[derive(Debug, Default)]
pub struct ToastStack {
    occupied: Vec<bool>,
}

impl ToastStack {
    pub fn acquire(&mut self) -> usize {
        match self.occupied.iter().position(|taken| !taken) {
            Some(slot) => {
                self.occupied[slot] = true;
                slot
            }
            None => {
                self.occupied.push(true);
                self.occupied.len() - 1
            }
        }
    }

    pub fn release(&mut self, slot: usize) {
        if let Some(taken) = self.occupied.get_mut(slot) {
            *taken = false;
        }
        while self.occupied.last() == Some(&false) {
            self.occupied.pop();
        }
    }

    pub fn live(&self) -> usize {
        self.occupied.iter().filter(|taken| **taken).count()
    }
}

pub fn slot_top(timing: &ToastTiming, slot: usize) -> f64 {
    timing.top_px + slot as f64 * timing.spacing_px
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub kind: ToastKind,
    pub slot: usize,
    pub timing: ToastTiming,
    pub on_removed: Callback<()>,
}

#[styled_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let phase = use_state(|| ToastPhase::Entering);

    {
        let phase_setter = phase.setter();
        let on_removed = props.on_removed.clone();
        let timing = props.timing;
        use_effect_with_deps(
            move |current: &ToastPhase| {
                match current.delay_ms(&timing) {
                    Some(delay) => {
                        let next = current.next();
                        Timeout::new(delay, move || phase_setter.set(next)).forget();
                    }
                    None => on_removed.emit(()),
                }
                || ()
            },
            *phase,
        );
    }

    let style = format!(
        "top: {}px; right: {}px; background: {}; transform: {};",
        slot_top(&props.timing, props.slot),
        props.timing.right_px,
        props.kind.color(),
        phase.transform(),
    );

    html! {
        <div
            class={classes!(
                css!(r#"
                    position: fixed;
                    padding: 15px 20px;
                    border-radius: 8px;
                    color: white;
                    font-weight: 500;
                    z-index: 10000;
                    transition: transform 0.3s ease;
                    max-width: 300px;
                "#),
                "notification",
                props.kind.class(),
            )}
            style={style}
            role="status"
        >
            { props.message.clone() }
        </div>
    }
}

/// Shows toasts by mounting a [`Toast`] per message into its own host node.
#[derive(Clone)]
pub struct Notifier {
    document: Document,
    timing: ToastTiming,
    stack: Rc<RefCell<ToastStack>>,
}

impl Notifier {
    pub fn new(document: Document, timing: ToastTiming) -> Self {
        Self {
            document,
            timing,
            stack: Rc::default(),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        log::debug!("toast ({}): {}", kind.class(), message);
        if let Err(e) = self.mount(message, kind) {
            log::warn!("could not show notification: {}", e);
        }
    }

    fn mount(&self, message: String, kind: ToastKind) -> Result<()> {
        let host = dom::append_div(&self.document, "notification-host", "")?;
        let slot = self.stack.borrow_mut().acquire();
        log::debug!("toast slot {} ({} on screen)", slot, self.stack.borrow().live());
        let app: Rc<RefCell<Option<AppHandle<Toast>>>> = Rc::default();

        let on_removed = {
            let app = app.clone();
            let stack = self.stack.clone();
            let host = host.clone();
            Callback::from(move |_: ()| {
                let Some(handle) = app.borrow_mut().take() else {
                    return;
                };
                stack.borrow_mut().release(slot);
                let host = host.clone();
                spawn_local(async move {
                    handle.destroy();
                    host.remove();
                });
            })
        };

        let props = ToastProps {
            message: message.into(),
            kind,
            slot,
            timing: self.timing,
            on_removed,
        };
        let handle = yew::Renderer::<Toast>::with_root_and_props(host.into(), props).render();
        *app.borrow_mut() = Some(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_run_in_order_and_total_lifetime() {
        let timing = ToastTiming::default();
        let mut phase = ToastPhase::Entering;
        let mut seen = vec![phase];
        let mut total = 0;
        while let Some(delay) = phase.delay_ms(&timing) {
            total += delay;
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![ToastPhase::Entering, ToastPhase::Visible, ToastPhase::Leaving, ToastPhase::Removed]
        );
        assert_eq!(total, 3300);
        assert_eq!(ToastPhase::Removed.next(), ToastPhase::Removed);
    }

    #[test]
    fn slides_out_when_display_time_is_up() {
        let timing = ToastTiming::default();
        let slide_out_at = ToastPhase::Entering.delay_ms(&timing).unwrap()
            + ToastPhase::Visible.delay_ms(&timing).unwrap();
        assert_eq!(slide_out_at, 3000);

        let short = ToastTiming {
            show_delay_ms: 100,
            display_ms: 50,
            ..ToastTiming::default()
        };
        assert_eq!(ToastPhase::Visible.delay_ms(&short), Some(0));
    }

    #[test]
    fn only_visible_toasts_are_on_screen() {
        assert_eq!(ToastPhase::Visible.transform(), "translateX(0)");
        assert_eq!(ToastPhase::Entering.transform(), "translateX(100%)");
        assert_eq!(ToastPhase::Leaving.transform(), "translateX(100%)");
    }

    #[test]
    fn kinds_have_distinct_colors() {
        assert_eq!(ToastKind::default(), ToastKind::Info);
        assert_eq!(ToastKind::Success.color(), "#10b981");
        assert_eq!(ToastKind::Error.color(), "#ef4444");
        assert_eq!(ToastKind::Info.color(), "#3b82f6");
    }

    #[test]
    fn stacked_toasts_take_separate_slots() {
        let mut stack = ToastStack::default();
        assert_eq!(stack.acquire(), 0);
        assert_eq!(stack.acquire(), 1);
        assert_eq!(stack.acquire(), 2);
        assert_eq!(stack.live(), 3);

        stack.release(1);
        assert_eq!(stack.acquire(), 1);

        stack.release(2);
        stack.release(1);
        stack.release(0);
        assert_eq!(stack.live(), 0);
        assert_eq!(stack.acquire(), 0);
    }

    #[test]
    fn releasing_unknown_slot_is_harmless() {
        let mut stack = ToastStack::default();
        stack.release(5);
        assert_eq!(stack.acquire(), 0);
    }

    #[test]
    fn slots_are_spaced_downwards() {
        let timing = ToastTiming::default();
        assert_eq!(slot_top(&timing, 0), 100.0);
        assert_eq!(slot_top(&timing, 2), 240.0);
    }
}
