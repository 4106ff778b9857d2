//! Page-load widget setup: tooltips, popovers, flash alerts, footer year and
//! autofocus.

use gloo_timers::callback::Timeout;
use lm_ui_core::UiConfig;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;

use crate::bootstrap;
use crate::dom::{self, Elements};

pub fn init_tooltips_and_popovers() {
    let mut failures = 0;
    for el in dom::query_all(r#"[data-bs-toggle="tooltip"]"#) {
        if bootstrap::Tooltip::new(&el).is_err() {
            failures += 1;
        }
    }
    for el in dom::query_all(r#"[data-bs-toggle="popover"]"#) {
        if bootstrap::Popover::new(&el).is_err() {
            failures += 1;
        }
    }
    if failures > 0 {
        warn!(failures, "tooltip/popover construction failed");
    }
}

/// Close every flash alert after the configured delay.
pub fn schedule_flash_dismissal(cfg: &UiConfig) {
    let alerts = dom::query_all(&cfg.flash_selector);
    debug!(count = alerts.len(), "scheduling flash dismissal");
    for alert in alerts {
        Timeout::new(cfg.flash_dismiss_ms, move || {
            match bootstrap::Alert::get_or_create_instance(&alert) {
                Ok(instance) => {
                    let _ = instance.close();
                }
                Err(e) => warn!(error = %dom::js_err(&e), "flash alert close failed"),
            }
        })
        .forget();
    }
}

pub fn stamp_year(els: &Elements) {
    if let Some(el) = &els.year {
        let year = js_sys::Date::new_0().get_full_year();
        dom::set_text(el, &year.to_string());
    }
}

pub fn autofocus_first_input() {
    if let Some(input) = dom::query("form input[autofocus]")
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = input.focus();
    }
}
