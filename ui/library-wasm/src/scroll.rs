//! Scroll position carried across pagination links via session storage.

use gloo_storage::{SessionStorage, Storage};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::dom;

/// Remember `scrollY` whenever a pagination link is clicked.
pub fn bind_pagination_memory(link_selector: &str, key: &str) -> Result<(), JsValue> {
    let selector = link_selector.to_owned();
    let key = key.to_owned();
    dom::listen(&dom::document(), "click", false, move |event| {
        let hit = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten());
        if hit.is_some() {
            let y = dom::window().scroll_y().unwrap_or(0.0);
            let _ = SessionStorage::set(&key, y);
        }
    })
}

/// Reads a remembered offset and forgets it, whether or not it was readable.
fn take_offset(read: impl FnOnce() -> Option<f64>, forget: impl FnOnce()) -> Option<f64> {
    let saved = read();
    forget();
    saved
}

/// Restore and forget a remembered position.
pub fn restore(key: &str) {
    let saved = take_offset(
        || SessionStorage::get::<f64>(key).ok(),
        || SessionStorage::delete(key),
    );
    let Some(saved) = saved else {
        return;
    };
    debug!(top = saved, "restoring scroll position");
    let opts = ScrollToOptions::new();
    opts.set_top(saved.max(0.0));
    opts.set_behavior(ScrollBehavior::Instant);
    dom::window().scroll_to_with_scroll_to_options(&opts);
}
