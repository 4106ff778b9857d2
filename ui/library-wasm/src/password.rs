//! Registration page password meter.

use lm_ui_core::strength::StrengthReading;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Elements};

/// Bind the meter when the page declares the input, bar and caption.
pub fn bind_strength_meter(els: &Elements) -> Result<(), JsValue> {
    let (Some(input), Some(bar), Some(text)) = (
        els.password_input.clone(),
        els.password_bar.clone(),
        els.password_text.clone(),
    ) else {
        return Ok(());
    };

    let target = input.clone();
    dom::listen(&target, "input", false, move |_| {
        let reading = StrengthReading::of(&input.value());
        let _ = bar.style().set_property("width", &format!("{}%", reading.percent));
        bar.set_class_name(&format!("progress-bar {}", reading.level.bar_class()));
        dom::set_text(&text, reading.level.label());
    })
}
