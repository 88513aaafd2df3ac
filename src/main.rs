use gloo_events::EventListener;
use log::{info, warn};

mod anchors;
mod config;
mod contact;
mod controller;
mod counter;
mod demo;
mod dom;
mod effects;
mod error;
mod nav;
mod reveal;
mod scroll;
mod search;
mod swipe;
mod timing;
mod tooltip;
mod components {
    pub mod demo_modal;
    pub mod notification;
}

use config::PageConfig;
use controller::PageController;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn start() -> error::Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;

    let config = match PageConfig::from_document(&document) {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring page config: {}", e);
            PageConfig::default()
        }
    };

    let controller = PageController::new(window, document, config)?;
    controller.install();
    // Handlers stay attached for the lifetime of the page.
    std::mem::forget(controller);
    Ok(())
}

fn run() {
    if let Err(e) = start() {
        log::error!("page interactions disabled: {}", e);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting page interactions");

    let Ok(document) = dom::document() else {
        log::error!("no document to attach to");
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(document.as_ref(), "DOMContentLoaded", |_| run()).forget();
    } else {
        run();
    }
}
