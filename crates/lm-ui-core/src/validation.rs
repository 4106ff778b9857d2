//! Live field-state styling for guarded forms.
//!
//! Typing is lenient: a field that does not yet satisfy its constraints only
//! loses the valid marker. Leaving the field is strict and applies the invalid
//! marker too.

use crate::amount::AmountRule;
use crate::surface::{FieldHandle, Marked};

pub const IS_VALID: &str = "is-valid";
pub const IS_INVALID: &str = "is-invalid";
pub const WAS_VALIDATED: &str = "was-validated";

#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationStateSync;

impl ValidationStateSync {
    pub fn on_input<F: FieldHandle>(&self, field: &F) {
        if field.check_validity() {
            field.remove_class(IS_INVALID);
            field.add_class(IS_VALID);
        } else {
            field.remove_class(IS_VALID);
        }
    }

    pub fn on_blur<F: FieldHandle>(&self, field: &F) {
        if field.check_validity() {
            field.add_class(IS_VALID);
            field.remove_class(IS_INVALID);
        } else {
            field.add_class(IS_INVALID);
            field.remove_class(IS_VALID);
        }
    }

    /// Amount fields are checked against their ceiling on every keystroke.
    /// Returns whether the current value is accepted.
    pub fn on_amount_input<F: FieldHandle>(&self, field: &F, rule: &AmountRule) -> bool {
        let ok = rule.accepts(&field.value());
        if ok {
            field.remove_class(IS_INVALID);
        } else {
            field.add_class(IS_INVALID);
        }
        ok
    }
}
