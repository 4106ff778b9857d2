//! `web-sys` implementations of the core page handles.

use lm_ui_core::surface::{
    ConfirmDialog, FieldHandle, FormHandle, Marked, NativePrompt, OverlaySurface, SubmitControl,
};
use lm_ui_core::{Result, UiError};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::bootstrap;
use crate::dom;

macro_rules! impl_marked {
    ($ty:ty, $el:ident) => {
        impl Marked for $ty {
            fn add_class(&self, class: &str) {
                dom::add_class(&self.$el, class);
            }

            fn remove_class(&self, class: &str) {
                dom::remove_class(&self.$el, class);
            }

            fn has_class(&self, class: &str) -> bool {
                dom::has_class(&self.$el, class)
            }
        }
    };
}

// ── Field ──

/// Any form control. Elements that are not constraint-validated count as valid.
#[derive(Clone)]
pub struct DomField {
    pub el: Element,
}

impl DomField {
    pub fn new(el: Element) -> Self {
        Self { el }
    }
}

impl_marked!(DomField, el);

impl FieldHandle for DomField {
    fn check_validity(&self) -> bool {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.check_validity()
        } else if let Some(select) = self.el.dyn_ref::<HtmlSelectElement>() {
            select.check_validity()
        } else if let Some(area) = self.el.dyn_ref::<HtmlTextAreaElement>() {
            area.check_validity()
        } else if let Some(button) = self.el.dyn_ref::<HtmlButtonElement>() {
            button.check_validity()
        } else {
            true
        }
    }

    fn value(&self) -> String {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = self.el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn focus(&self) {
        if let Some(el) = self.el.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn scroll_into_view(&self) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Center);
        self.el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

// ── Submit control ──

#[derive(Clone)]
pub struct DomSubmit {
    pub el: Element,
}

impl SubmitControl for DomSubmit {
    fn disable(&self) {
        let _ = self.el.set_attribute("disabled", "disabled");
    }

    fn loading_text(&self) -> Option<String> {
        self.el
            .get_attribute("data-loading-text")
            .filter(|t| !t.is_empty())
    }

    fn set_label(&self, label: &str) {
        if let Ok(Some(text)) = self.el.query_selector(".btn-text") {
            dom::set_text(&text, label);
        }
    }

    fn reveal_spinner(&self) {
        if let Ok(Some(spinner)) = self.el.query_selector(".spinner-border") {
            dom::remove_class(&spinner, "d-none");
        }
    }
}

// ── Form ──

#[derive(Clone)]
pub struct DomForm {
    pub el: HtmlFormElement,
    help_text_selector: String,
}

impl DomForm {
    pub fn new(el: HtmlFormElement, help_text_selector: &str) -> Self {
        Self {
            el,
            help_text_selector: help_text_selector.to_owned(),
        }
    }
}

impl_marked!(DomForm, el);

impl FormHandle for DomForm {
    type Field = DomField;
    type Control = DomSubmit;

    fn check_validity(&self) -> bool {
        self.el.check_validity()
    }

    fn first_invalid(&self) -> Option<DomField> {
        self.el.query_selector(":invalid").ok().flatten().map(DomField::new)
    }

    fn field(&self, id: &str) -> Option<DomField> {
        self.el
            .query_selector(&format!("#{id}"))
            .ok()
            .flatten()
            .map(DomField::new)
    }

    fn submit_control(&self) -> Option<DomSubmit> {
        self.el
            .query_selector(r#"button[type="submit"], input[type="submit"]"#)
            .ok()
            .flatten()
            .map(|el| DomSubmit { el })
    }

    fn data(&self, key: &str) -> Option<String> {
        self.el.get_attribute(&format!("data-{key}"))
    }

    fn help_text(&self) -> Option<String> {
        self.el
            .query_selector(&self.help_text_selector)
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
    }

    fn submit(&self) -> Result<()> {
        self.el
            .submit()
            .map_err(|e| UiError::Submit(dom::js_err(&e)))
    }
}

// ── Confirmation dialog ──

pub struct ModalDialog {
    root: Element,
    title: Option<Element>,
    message: Option<Element>,
    button: HtmlElement,
}

impl ModalDialog {
    /// A dialog is usable only when its root and confirm control both exist.
    pub fn from_elements(
        root: Option<Element>,
        title: Option<Element>,
        message: Option<Element>,
        button: Option<HtmlElement>,
    ) -> Option<Self> {
        Some(Self {
            root: root?,
            title,
            message,
            button: button?,
        })
    }

    fn instance(&self) -> Result<bootstrap::Modal> {
        bootstrap::Modal::get_or_create_instance(&self.root)
            .map_err(|e| UiError::Widget(dom::js_err(&e)))
    }
}

impl ConfirmDialog for ModalDialog {
    fn set_title(&self, title: &str) {
        if let Some(el) = &self.title {
            dom::set_text(el, title);
        }
    }

    fn set_message(&self, message: &str) {
        if let Some(el) = &self.message {
            dom::set_text(el, message);
        }
    }

    fn set_confirm_label(&self, label: &str) {
        dom::set_text(&self.button, label);
    }

    fn open(&self) -> Result<()> {
        self.instance()?
            .show()
            .map_err(|e| UiError::Widget(dom::js_err(&e)))
    }

    fn close(&self) -> Result<()> {
        self.instance()?
            .hide()
            .map_err(|e| UiError::Widget(dom::js_err(&e)))
    }
}

// ── Native prompt ──

pub struct WindowPrompt;

impl NativePrompt for WindowPrompt {
    fn confirm(&self, message: &str) -> bool {
        dom::window().confirm_with_message(message).unwrap_or(false)
    }
}

// ── Loading overlay ──

pub struct DomOverlay {
    root: HtmlElement,
    text: Option<Element>,
}

impl DomOverlay {
    pub fn new(root: HtmlElement, text: Option<Element>) -> Self {
        Self { root, text }
    }
}

impl OverlaySurface for DomOverlay {
    fn reveal(&self) {
        dom::remove_class(&self.root, "d-none");
    }

    fn conceal(&self) {
        dom::add_class(&self.root, "d-none");
    }

    fn set_message(&self, message: &str) {
        if let Some(el) = &self.text {
            dom::set_text(el, message);
        }
    }

    fn set_busy(&self, busy: bool) {
        let Some(body) = dom::body() else {
            return;
        };
        let _ = if busy {
            body.set_attribute("aria-busy", "true")
        } else {
            body.remove_attribute("aria-busy")
        };
    }
}
