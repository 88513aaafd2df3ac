use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// A repeating timer whose callback decides when it ends.
///
/// Dropping the `Ticker` cancels it. When the callback returns
/// [`TickControl::Stop`] the interval is released on the next microtask so
/// the closure is never freed while it is still running.
pub struct Ticker {
    interval: Rc<RefCell<Option<Interval>>>,
}

impl Ticker {
    pub fn start<F>(period_ms: u32, mut on_tick: F) -> Self
    where
        F: FnMut() -> TickControl + 'static,
    {
        let interval: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let handle: Weak<RefCell<Option<Interval>>> = Rc::downgrade(&interval);

        let running = Interval::new(period_ms, move || {
            if on_tick() == TickControl::Stop {
                release(&handle);
            }
        });
        *interval.borrow_mut() = Some(running);

        Self { interval }
    }

    pub fn stop(&self) {
        release(&Rc::downgrade(&self.interval));
    }
}

fn release(handle: &Weak<RefCell<Option<Interval>>>) {
    let Some(slot) = handle.upgrade() else {
        return;
    };
    let taken = slot.borrow_mut().take();
    if let Some(interval) = taken {
        wasm_bindgen_futures::spawn_local(async move {
            drop(interval);
        });
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
