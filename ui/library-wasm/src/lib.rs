//! Library Desk browser bundle.
//!
//! Binds the DOM-free behaviour from `lm-ui-core` to the server-rendered
//! library pages: guarded form submission, the shared confirmation dialog, the
//! loading overlay, and the small per-page helpers exported to templates.

pub mod api;
pub mod bootstrap;
pub mod dom;
pub mod events;
pub mod handles;
pub mod logging;
pub mod password;
pub mod scroll;
pub mod state;
pub mod widgets;

use std::rc::Rc;

use lm_ui_core::config::CONFIG_ELEMENT_ID;
use lm_ui_core::{ConfirmationGate, LoadingOverlay, UiConfig};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

use crate::handles::{DomOverlay, ModalDialog, WindowPrompt};

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document();
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", false, |_| {
            if let Err(e) = init() {
                gloo_console::error!("library ui init failed", e);
            }
        })
    } else {
        init()
    }
}

fn load_config() -> UiConfig {
    let raw = dom::by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    match UiConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            // Logging is not up yet; report straight to the console.
            gloo_console::warn!(format!("{err}, using defaults"));
            UiConfig::default()
        }
    }
}

/// Main initialisation sequence, run once the document has parsed.
fn init() -> Result<(), JsValue> {
    let cfg = load_config();
    logging::init(&cfg.log_level);

    let els = dom::Elements::bind(&cfg);

    let overlay = match els.overlay.clone() {
        Some(root) => LoadingOverlay::new(Box::new(DomOverlay::new(root, els.overlay_text.clone()))),
        None => LoadingOverlay::detached(),
    };
    let dialog = ModalDialog::from_elements(
        els.confirm_modal.clone(),
        els.confirm_title.clone(),
        els.confirm_message.clone(),
        els.confirm_button.clone(),
    );
    let gate = ConfirmationGate::new(
        dialog.map(|d| Box::new(d) as Box<dyn lm_ui_core::surface::ConfirmDialog>),
        Box::new(WindowPrompt),
    );
    if !gate.has_dialog() {
        warn!("no confirmation dialog on page, falling back to native prompt");
    }

    let page = state::install(state::Page {
        config: cfg,
        overlay: Rc::new(overlay),
        gate: Rc::new(gate),
    });

    widgets::stamp_year(&els);
    widgets::schedule_flash_dismissal(&page.config);
    widgets::init_tooltips_and_popovers();
    widgets::autofocus_first_input();
    scroll::restore(&page.config.scroll_storage_key);

    events::bind_confirm_dialog(&els, &page)?;
    let guarded = events::bind_guarded_forms(&page)?;
    password::bind_strength_meter(&els)?;
    scroll::bind_pagination_memory(
        &page.config.pagination_link_selector,
        &page.config.scroll_storage_key,
    )?;

    info!(guarded, "library ui ready");
    Ok(())
}
