//! Event binding.
//!
//! Wires the guarded forms, the shared confirmation dialog and the live
//! validation listeners. Async continuations are spawned via
//! `wasm_bindgen_futures::spawn_local`.

use std::rc::Rc;

use lm_ui_core::surface::FormHandle;
use lm_ui_core::{FormContext, FormSubmissionGuard, ValidationStateSync};
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement};

use crate::bootstrap;
use crate::dom::{self, Elements};
use crate::handles::{DomField, DomForm};
use crate::state::Page;

/// The dialog's confirm control and dismissal settle the gate's bound request.
pub fn bind_confirm_dialog(els: &Elements, page: &Rc<Page>) -> Result<(), JsValue> {
    let (Some(modal), Some(button)) = (&els.confirm_modal, &els.confirm_button) else {
        return Ok(());
    };

    let gate = Rc::clone(&page.gate);
    dom::listen(button, "click", false, move |_| gate.resolve_confirmed())?;

    let gate = Rc::clone(&page.gate);
    dom::listen(modal, bootstrap::MODAL_HIDDEN_EVENT, false, move |_| {
        gate.resolve_dismissed()
    })
}

/// Attach a submission guard to every form matching the configured selector.
pub fn bind_guarded_forms(page: &Rc<Page>) -> Result<usize, JsValue> {
    let cfg = &page.config;
    let forms: Vec<HtmlFormElement> = dom::query_all(&cfg.guarded_form_selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
        .collect();

    for el in &forms {
        let form = DomForm::new(el.clone(), &cfg.help_text_selector);
        let context = FormContext::from_form(&form, cfg);
        let guard = Rc::new(FormSubmissionGuard::new(
            form,
            context,
            Rc::clone(&page.overlay),
            Rc::clone(&page.gate),
        ));

        if dom::has_class(el, &cfg.validation_form_class) {
            el.set_no_validate(true);
            bind_field_state(el)?;
        }
        if let Some(rule) = guard.context().amount_rule.clone() {
            if let Some(field) = guard.form().field(&rule.field_id) {
                let target = field.el.clone();
                dom::listen(&target, "input", false, move |_| {
                    ValidationStateSync.on_amount_input(&field, &rule);
                })?;
            }
        }
        bind_submit(el, guard)?;
    }

    debug!(count = forms.len(), "guarded forms bound");
    Ok(forms.len())
}

fn bind_submit(el: &HtmlFormElement, guard: Rc<FormSubmissionGuard<DomForm>>) -> Result<(), JsValue> {
    dom::listen(el, "submit", false, move |event| {
        let outcome = guard.on_submit();
        if !outcome.cancels_native_submit() {
            return;
        }
        event.prevent_default();
        event.stop_propagation();
        if outcome == lm_ui_core::SubmitOutcome::AwaitingConfirmation {
            let guard = Rc::clone(&guard);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = guard.confirm_and_submit().await {
                    error!(error = %err, "guarded submit failed");
                }
            });
        }
    })
}

/// Lenient `input` / strict `blur` field styling. Both listen in the capture
/// phase because `blur` does not bubble.
fn bind_field_state(form: &HtmlFormElement) -> Result<(), JsValue> {
    dom::listen(form, "input", true, |event| {
        if let Some(field) = event_field(&event) {
            ValidationStateSync.on_input(&field);
        }
    })?;
    dom::listen(form, "blur", true, |event| {
        if let Some(field) = event_field(&event) {
            ValidationStateSync.on_blur(&field);
        }
    })
}

fn event_field(event: &web_sys::Event) -> Option<DomField> {
    let target = event.target()?;
    let el = target.dyn_into::<Element>().ok()?;
    el.dyn_ref::<web_sys::HtmlElement>()?;
    Some(DomField::new(el))
}
