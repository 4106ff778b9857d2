//! DOM lookups and element helpers.
//!
//! Host markup is optional: every lookup returns `Option` and callers degrade
//! when an element is missing. `Elements` resolves the page-wide singletons
//! once at startup.

use lm_ui_core::UiConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn body() -> Option<HtmlElement> {
    document().body()
}

/// Renders a JS exception for logs and `UiError` payloads.
pub fn js_err(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Attach a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, capture: bool, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_capture(capture);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &opts,
    )?;
    cb.forget();
    Ok(())
}

/// Flip an input between masked and plain text.
pub fn toggle_password_visibility(input: &HtmlInputElement) {
    let masked = input.get_attribute("type").as_deref() == Some("password");
    let _ = input.set_attribute("type", if masked { "text" } else { "password" });
}

// ── Elements struct ──

/// Page-wide singletons declared by the host layout. Any of them may be absent.
#[derive(Clone)]
pub struct Elements {
    // Confirmation dialog
    pub confirm_modal: Option<Element>,
    pub confirm_title: Option<Element>,
    pub confirm_message: Option<Element>,
    pub confirm_button: Option<HtmlElement>,

    // Loading overlay
    pub overlay: Option<HtmlElement>,
    pub overlay_text: Option<Element>,

    // Registration
    pub password_input: Option<HtmlInputElement>,
    pub password_bar: Option<HtmlElement>,
    pub password_text: Option<Element>,

    // Footer
    pub year: Option<Element>,
}

impl Elements {
    /// Resolve all DOM references. Call once after the document has parsed.
    pub fn bind(cfg: &UiConfig) -> Elements {
        let confirm_modal = by_id(&cfg.confirm_modal_id);
        let within_modal = |id: &str| {
            confirm_modal
                .as_ref()
                .and_then(|m| m.query_selector(&format!("#{id}")).ok().flatten())
        };

        Elements {
            confirm_title: within_modal(&cfg.confirm_title_id),
            confirm_message: within_modal(&cfg.confirm_message_id),
            confirm_button: within_modal(&cfg.confirm_button_id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
            confirm_modal,

            overlay: by_id_typed::<HtmlElement>(&cfg.overlay_id),
            overlay_text: by_id(&cfg.overlay_text_id),

            password_input: by_id_typed::<HtmlInputElement>(&cfg.password_input_id),
            password_bar: by_id_typed::<HtmlElement>(&cfg.password_bar_id),
            password_text: by_id(&cfg.password_text_id),

            year: by_id("year"),
        }
    }
}
