//! Page handle traits.
//!
//! The core never touches the DOM directly. The browser bundle implements these
//! over `web-sys` elements; tests implement them over in-memory records.

use crate::error::Result;

/// Marker-class access (`classList`).
pub trait Marked {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
}

/// A single form control with declared constraints.
pub trait FieldHandle: Marked {
    /// Native constraint check (`checkValidity()`).
    fn check_validity(&self) -> bool;
    fn value(&self) -> String;
    fn focus(&self);
    fn scroll_into_view(&self);
}

/// The control that submits a guarded form.
pub trait SubmitControl {
    fn disable(&self);
    /// Per-control processing label (`data-loading-text`).
    fn loading_text(&self) -> Option<String>;
    fn set_label(&self, label: &str);
    /// No-op when the control carries no spinner.
    fn reveal_spinner(&self);
}

pub trait FormHandle: Marked {
    type Field: FieldHandle;
    type Control: SubmitControl;

    fn check_validity(&self) -> bool;
    fn first_invalid(&self) -> Option<Self::Field>;
    fn field(&self, id: &str) -> Option<Self::Field>;
    fn submit_control(&self) -> Option<Self::Control>;
    /// Reads a `data-*` attribute by its suffix (`"balance"` → `data-balance`).
    fn data(&self, key: &str) -> Option<String>;
    /// Text of the form's help node (`.form-text`), if any.
    fn help_text(&self) -> Option<String>;
    /// Programmatic submit; does not re-enter the submit listener.
    fn submit(&self) -> Result<()>;
}

/// The single shared confirmation dialog declared by the host page.
pub trait ConfirmDialog {
    fn set_title(&self, title: &str);
    fn set_message(&self, message: &str);
    fn set_confirm_label(&self, label: &str);
    fn open(&self) -> Result<()>;
    fn close(&self) -> Result<()>;
}

/// Blocking host prompt (`window.confirm`).
pub trait NativePrompt {
    fn confirm(&self, message: &str) -> bool;
}

pub trait OverlaySurface {
    fn reveal(&self);
    fn conceal(&self);
    fn set_message(&self, message: &str);
    /// `aria-busy` on the page root.
    fn set_busy(&self, busy: bool);
}
