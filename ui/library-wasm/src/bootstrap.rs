//! Bindings to the page's widget library (`window.bootstrap`).
//!
//! Every call is `catch`-ed: a page that loads without the library must not
//! abort initialisation.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Modal;

    #[wasm_bindgen(catch, static_method_of = Modal, js_namespace = bootstrap, js_name = getOrCreateInstance)]
    pub fn get_or_create_instance(el: &Element) -> Result<Modal, JsValue>;

    #[wasm_bindgen(catch, method)]
    pub fn show(this: &Modal) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method)]
    pub fn hide(this: &Modal) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Alert;

    #[wasm_bindgen(catch, static_method_of = Alert, js_namespace = bootstrap, js_name = getOrCreateInstance)]
    pub fn get_or_create_instance(el: &Element) -> Result<Alert, JsValue>;

    #[wasm_bindgen(catch, method)]
    pub fn close(this: &Alert) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Tooltip;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap)]
    pub fn new(el: &Element) -> Result<Tooltip, JsValue>;

    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Popover;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap)]
    pub fn new(el: &Element) -> Result<Popover, JsValue>;
}

/// Modal event fired once a hide transition has finished.
pub const MODAL_HIDDEN_EVENT: &str = "hidden.bs.modal";
