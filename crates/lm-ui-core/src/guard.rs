//! Guarded form submission.
//!
//! Each submit runs, short-circuiting on the first failure:
//! native validity → amount rule (opt-in) → confirmation (opt-in) → loading state.
//! The loading state itself is opt-in too: only forms marked for it get the
//! disabled control and the overlay.
//! A confirmation always cancels the native submit; the browser bundle then
//! drives [`FormSubmissionGuard::confirm_and_submit`], which submits
//! programmatically once the user agrees.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::amount::{AmountRule, ceiling_from_help_text};
use crate::config::UiConfig;
use crate::confirm::{ConfirmationGate, ConfirmationRequest};
use crate::error::Result;
use crate::overlay::{LoadingHold, LoadingOverlay};
use crate::surface::{FieldHandle, FormHandle, Marked, SubmitControl};
use crate::validation::{IS_INVALID, WAS_VALIDATED};

/// Confirmation a form opts into. The template may reference `{action}`,
/// `{loan_id}`, `{amount}` and `{balance}`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmationSpec {
    pub title: String,
    pub message_template: String,
    pub confirm_label: String,
    pub action: String,
}

impl ConfirmationSpec {
    pub fn payment() -> Self {
        Self {
            title: "Confirm Payment".to_owned(),
            message_template:
                "{action} of ${amount} for loan #{loan_id}?\nOutstanding balance: ${balance}"
                    .to_owned(),
            confirm_label: "Record Payment".to_owned(),
            action: "Record payment".to_owned(),
        }
    }

    pub fn render(&self, values: &MessageValues) -> ConfirmationRequest {
        let money = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
        let message = self
            .message_template
            .replace("{action}", &self.action)
            .replace("{loan_id}", values.loan_id.as_deref().unwrap_or_default())
            .replace("{amount}", &money(values.amount))
            .replace("{balance}", &money(values.balance));
        ConfirmationRequest::new(self.title.clone(), message, self.confirm_label.clone())
    }
}

/// Current form values a confirmation message is built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageValues {
    pub loan_id: Option<String>,
    pub amount: Option<f64>,
    pub balance: Option<f64>,
}

/// Per-form settings, fixed once the page has loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct FormContext {
    pub amount_rule: Option<AmountRule>,
    pub confirmation: Option<ConfirmationSpec>,
    pub processing_label: String,
    pub loading_message: Option<String>,
    pub loading: bool,
}

impl FormContext {
    pub fn plain(processing_label: impl Into<String>) -> Self {
        Self {
            amount_rule: None,
            confirmation: None,
            processing_label: processing_label.into(),
            loading_message: None,
            loading: true,
        }
    }

    /// Reads the opt-ins a form declares in its markup.
    ///
    /// The amount ceiling comes from `data-balance`. Forms that only render it
    /// as help text fall back to scraping that text.
    pub fn from_form<F: FormHandle>(form: &F, config: &UiConfig) -> Self {
        let amount_rule = form.field(&config.amount_field_id).map(|_| {
            let max = match form.data("balance") {
                Some(raw) => AmountRule::parse(&raw),
                None => {
                    let text = form.help_text().unwrap_or_default();
                    warn!(
                        field = %config.amount_field_id,
                        "no data-balance on payment form, reading ceiling from help text"
                    );
                    ceiling_from_help_text(&text)
                }
            };
            AmountRule::new(config.amount_field_id.clone(), max)
        });

        let custom_message = form.data("confirm-message");
        let confirmation = match (&amount_rule, custom_message) {
            (_, Some(message)) => Some(ConfirmationSpec {
                title: "Confirm".to_owned(),
                message_template: message,
                confirm_label: "Confirm".to_owned(),
                action: String::new(),
            }),
            (Some(_), None) => Some(ConfirmationSpec::payment()),
            (None, None) => None,
        }
        .map(|mut spec| {
            if let Some(title) = form.data("confirm-title") {
                spec.title = title;
            }
            if let Some(label) = form.data("confirm-label") {
                spec.confirm_label = label;
            }
            if let Some(action) = form.data("confirm-action") {
                spec.action = action;
            }
            spec
        });

        Self {
            amount_rule,
            confirmation,
            processing_label: config.processing_label.clone(),
            loading_message: form.data("loading-message"),
            loading: form.has_class(&config.loading_form_class),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    ConstraintViolation,
    AmountOutOfRange,
}

/// What the submit listener must do with the native event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Let the native submit continue; the loading state is already on.
    Proceed,
    /// Cancel the native submit.
    Blocked(BlockReason),
    /// Cancel the native submit and run `confirm_and_submit`.
    AwaitingConfirmation,
}

impl SubmitOutcome {
    pub fn cancels_native_submit(self) -> bool {
        !matches!(self, SubmitOutcome::Proceed)
    }
}

pub struct FormSubmissionGuard<F: FormHandle> {
    form: F,
    context: FormContext,
    overlay: Rc<LoadingOverlay>,
    gate: Rc<ConfirmationGate>,
    hold: RefCell<Option<LoadingHold>>,
}

impl<F: FormHandle> FormSubmissionGuard<F> {
    pub fn new(
        form: F,
        context: FormContext,
        overlay: Rc<LoadingOverlay>,
        gate: Rc<ConfirmationGate>,
    ) -> Self {
        Self {
            form,
            context,
            overlay,
            gate,
            hold: RefCell::new(None),
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn context(&self) -> &FormContext {
        &self.context
    }

    pub fn on_submit(&self) -> SubmitOutcome {
        if !self.form.check_validity() {
            self.form.add_class(WAS_VALIDATED);
            if let Some(field) = self.form.first_invalid() {
                field.focus();
                field.scroll_into_view();
            }
            debug!("submit blocked by native constraints");
            return SubmitOutcome::Blocked(BlockReason::ConstraintViolation);
        }

        if let Some(rule) = &self.context.amount_rule {
            if !self.amount_accepted(rule) {
                debug!(max = rule.max, "submit blocked by amount rule");
                return SubmitOutcome::Blocked(BlockReason::AmountOutOfRange);
            }
        }

        if self.context.confirmation.is_some() {
            return SubmitOutcome::AwaitingConfirmation;
        }

        if self.context.loading {
            self.begin_loading();
        }
        SubmitOutcome::Proceed
    }

    /// Asks for confirmation and submits on acceptance. Returns whether the
    /// form was submitted. Forms without a confirmation submit directly.
    pub async fn confirm_and_submit(&self) -> Result<bool> {
        if let Some(spec) = &self.context.confirmation {
            let request = spec.render(&self.message_values());
            if !self.gate.confirm(request).await {
                info!("guarded submit cancelled by user");
                return Ok(false);
            }
        }

        if self.context.loading {
            self.begin_loading();
        }
        if let Err(err) = self.form.submit() {
            drop(self.hold.borrow_mut().take());
            return Err(err);
        }
        Ok(true)
    }

    /// Disables the submit control, swaps in the processing label, reveals
    /// the spinner and holds the overlay open until the page unloads.
    pub fn begin_loading(&self) {
        if let Some(control) = self.form.submit_control() {
            control.disable();
            let label = control
                .loading_text()
                .unwrap_or_else(|| self.context.processing_label.clone());
            control.set_label(&label);
            control.reveal_spinner();
        }
        let hold = self.overlay.acquire(self.context.loading_message.as_deref());
        *self.hold.borrow_mut() = Some(hold);
    }

    fn amount_accepted(&self, rule: &AmountRule) -> bool {
        let Some(field) = self.form.field(&rule.field_id) else {
            return true;
        };
        let ok = rule.accepts(&field.value());
        if ok {
            field.remove_class(IS_INVALID);
        } else {
            field.add_class(IS_INVALID);
        }
        ok
    }

    fn message_values(&self) -> MessageValues {
        let amount = self.context.amount_rule.as_ref().map(|rule| {
            let raw = self
                .form
                .field(&rule.field_id)
                .map(|f| f.value())
                .unwrap_or_default();
            AmountRule::parse(&raw)
        });
        MessageValues {
            loan_id: self.form.data("loan-id"),
            amount,
            balance: self.context.amount_rule.as_ref().map(|rule| rule.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Marked;
    use crate::testing::{MockDialog, MockField, MockForm, MockOverlay, MockPrompt};
    use crate::validation::{IS_VALID, ValidationStateSync};

    struct Page {
        overlay: Rc<LoadingOverlay>,
        overlay_log: Rc<std::cell::RefCell<crate::testing::OverlayLog>>,
        gate: Rc<ConfirmationGate>,
        dialog_log: Rc<std::cell::RefCell<crate::testing::DialogLog>>,
    }

    fn page() -> Page {
        let (surface, overlay_log) = MockOverlay::new();
        let (dialog, dialog_log) = MockDialog::new();
        let (prompt, _) = MockPrompt::answering(false);
        Page {
            overlay: Rc::new(LoadingOverlay::new(Box::new(surface))),
            overlay_log,
            gate: Rc::new(ConfirmationGate::new(Some(Box::new(dialog)), Box::new(prompt))),
            dialog_log,
        }
    }

    fn payment_form(amount: &str) -> MockForm {
        let form = MockForm::new();
        form.add_class("needs-loading");
        form.add_field(MockField::required("payment_amount"));
        form.field("payment_amount").unwrap().set_value(amount);
        form.set_data("balance", "50");
        form.set_data("loan-id", "1042");
        form
    }

    #[test]
    fn plain_valid_form_proceeds_with_one_loading_activation() {
        let page = page();
        let form = MockForm::new();
        form.add_class("needs-loading");
        form.add_field(MockField::new("title", "Dune"));
        let context = FormContext::from_form(&form, &UiConfig::default());
        assert_eq!(context, FormContext::plain("Processing..."));

        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());
        assert_eq!(guard.on_submit(), SubmitOutcome::Proceed);

        assert_eq!(page.overlay_log.borrow().reveals, 1);
        assert!(page.overlay.is_visible());
        let control = guard.form().control();
        assert!(control.disabled.get());
        assert_eq!(control.label.borrow().as_str(), "Processing...");
        assert!(control.spinner.get());
        assert_eq!(page.dialog_log.borrow().opens, 0);
    }

    #[test]
    fn invalid_form_is_blocked_and_first_invalid_field_focused() {
        let page = page();
        let form = MockForm::new();
        form.add_field(MockField::new("title", "Dune"));
        form.add_field(MockField::required("isbn"));
        form.add_field(MockField::required("author"));

        let guard = FormSubmissionGuard::new(
            form,
            FormContext::plain("Saving..."),
            page.overlay.clone(),
            page.gate.clone(),
        );
        let outcome = guard.on_submit();

        assert_eq!(outcome, SubmitOutcome::Blocked(BlockReason::ConstraintViolation));
        assert!(outcome.cancels_native_submit());
        assert!(guard.form().has_class(WAS_VALIDATED));
        let isbn = guard.form().field("isbn").unwrap();
        assert!(isbn.focused());
        assert!(isbn.scrolled());
        assert!(!guard.form().field("author").unwrap().focused());
        assert!(!page.overlay.is_visible());
        assert!(!guard.form().control().disabled.get());
    }

    #[test]
    fn validation_only_form_submits_without_loading_state() {
        let page = page();
        let form = MockForm::new();
        form.add_class("needs-validation");
        form.add_field(MockField::new("title", "Dune"));
        let context = FormContext::from_form(&form, &UiConfig::default());
        assert!(!context.loading);

        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());
        assert_eq!(guard.on_submit(), SubmitOutcome::Proceed);

        assert!(!page.overlay.is_visible());
        assert_eq!(page.overlay_log.borrow().reveals, 0);
        let control = guard.form().control();
        assert!(!control.disabled.get());
        assert!(!control.spinner.get());
        assert!(control.label.borrow().is_empty());
    }

    #[test]
    fn control_loading_text_overrides_default_label() {
        let page = page();
        let form = MockForm::new();
        *form.control().loading_text.borrow_mut() = Some("Checking out...".to_owned());

        let guard = FormSubmissionGuard::new(
            form,
            FormContext::plain("Processing..."),
            page.overlay.clone(),
            page.gate.clone(),
        );
        guard.on_submit();
        assert_eq!(guard.form().control().label.borrow().as_str(), "Checking out...");
    }

    #[test]
    fn payment_context_prefers_data_balance() {
        let form = payment_form("10");
        form.set_help_text("Outstanding balance: $999.00");
        let context = FormContext::from_form(&form, &UiConfig::default());

        assert_eq!(context.amount_rule, Some(AmountRule::new("payment_amount", 50.0)));
        assert_eq!(context.confirmation, Some(ConfirmationSpec::payment()));
    }

    #[test]
    fn payment_context_falls_back_to_help_text() {
        let form = MockForm::new();
        form.add_field(MockField::new("payment_amount", "5"));
        form.set_help_text("Outstanding balance: $12.50");
        let context = FormContext::from_form(&form, &UiConfig::default());
        assert_eq!(context.amount_rule.map(|r| r.max), Some(12.5));

        let bare = MockForm::new();
        bare.add_field(MockField::new("payment_amount", "5"));
        let context = FormContext::from_form(&bare, &UiConfig::default());
        assert_eq!(context.amount_rule.map(|r| r.max), Some(0.0));
    }

    #[test]
    fn custom_confirmation_from_data_attributes() {
        let form = MockForm::new();
        form.set_data("confirm-message", "{action} this member?");
        form.set_data("confirm-action", "Suspend");
        form.set_data("confirm-label", "Suspend");
        form.set_data("loading-message", "Updating member...");
        let context = FormContext::from_form(&form, &UiConfig::default());

        let spec = context.confirmation.clone().unwrap();
        assert_eq!(spec.title, "Confirm");
        let request = spec.render(&MessageValues::default());
        assert_eq!(request.message, "Suspend this member?");
        assert_eq!(request.confirm_label, "Suspend");
        assert_eq!(context.loading_message.as_deref(), Some("Updating member..."));
        assert!(context.amount_rule.is_none());
    }

    #[test]
    fn amount_over_balance_is_blocked() {
        let page = page();
        let form = payment_form("60");
        let context = FormContext::from_form(&form, &UiConfig::default());
        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());

        assert_eq!(
            guard.on_submit(),
            SubmitOutcome::Blocked(BlockReason::AmountOutOfRange)
        );
        assert!(guard.form().field("payment_amount").unwrap().has_class(IS_INVALID));
        assert_eq!(page.dialog_log.borrow().opens, 0);
        assert!(!page.overlay.is_visible());
    }

    #[tokio::test]
    async fn declined_confirmation_never_submits() -> anyhow::Result<()> {
        let page = page();
        let form = payment_form("20");
        let context = FormContext::from_form(&form, &UiConfig::default());
        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());

        assert_eq!(guard.on_submit(), SubmitOutcome::AwaitingConfirmation);
        let (submitted, ()) = tokio::join!(guard.confirm_and_submit(), async {
            tokio::task::yield_now().await;
            page.gate.resolve_dismissed();
        });

        assert!(!submitted?);
        assert_eq!(guard.form().submits(), 0);
        assert!(!page.overlay.is_visible());
        assert!(!guard.form().control().disabled.get());
        Ok(())
    }

    #[tokio::test]
    async fn failed_submit_hides_overlay() {
        let page = page();
        let form = payment_form("20");
        form.fail_submit();
        let context = FormContext::from_form(&form, &UiConfig::default());
        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());

        let (result, ()) = tokio::join!(guard.confirm_and_submit(), async {
            tokio::task::yield_now().await;
            page.gate.resolve_confirmed();
        });

        assert!(result.is_err());
        assert!(!page.overlay.is_visible());
        assert_eq!(page.overlay.holds(), 0);
    }

    #[tokio::test]
    async fn failed_submit_keeps_other_forms_loading() {
        let page = page();
        let other = FormSubmissionGuard::new(
            MockForm::new(),
            FormContext::plain("Saving..."),
            page.overlay.clone(),
            page.gate.clone(),
        );
        assert_eq!(other.on_submit(), SubmitOutcome::Proceed);

        let form = payment_form("20");
        form.fail_submit();
        let context = FormContext::from_form(&form, &UiConfig::default());
        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());
        let (result, ()) = tokio::join!(guard.confirm_and_submit(), async {
            tokio::task::yield_now().await;
            page.gate.resolve_confirmed();
        });

        assert!(result.is_err());
        assert!(page.overlay.is_visible());
        assert_eq!(page.overlay.holds(), 1);
    }

    #[tokio::test]
    async fn payment_form_end_to_end() -> anyhow::Result<()> {
        let page = page();
        let form = payment_form("");
        let context = FormContext::from_form(&form, &UiConfig::default());
        let rule = context.amount_rule.clone().unwrap();
        let guard = FormSubmissionGuard::new(form, context, page.overlay.clone(), page.gate.clone());
        let amount = guard.form().field("payment_amount").unwrap();
        let sync = ValidationStateSync;

        amount.set_value("60");
        assert!(!sync.on_amount_input(&amount, &rule));
        assert!(amount.has_class(IS_INVALID));
        assert_eq!(
            guard.on_submit(),
            SubmitOutcome::Blocked(BlockReason::AmountOutOfRange)
        );

        amount.set_value("40");
        sync.on_input(&amount);
        sync.on_amount_input(&amount, &rule);
        sync.on_blur(&amount);
        assert!(!amount.has_class(IS_INVALID));
        assert!(amount.has_class(IS_VALID));

        assert_eq!(guard.on_submit(), SubmitOutcome::AwaitingConfirmation);
        assert!(!page.overlay.is_visible());

        let (submitted, ()) = tokio::join!(guard.confirm_and_submit(), async {
            tokio::task::yield_now().await;
            {
                let dialog = page.dialog_log.borrow();
                assert!(dialog.open);
                assert!(dialog.message.contains("40"));
                assert!(dialog.message.contains("50"));
                assert!(dialog.message.contains("1042"));
                assert_eq!(dialog.title, "Confirm Payment");
            }
            page.gate.resolve_confirmed();
        });

        assert!(submitted?);
        assert_eq!(guard.form().submits(), 1);
        assert!(page.overlay.is_visible());
        assert_eq!(page.overlay_log.borrow().reveals, 1);
        let control = guard.form().control();
        assert!(control.disabled.get());
        assert_eq!(control.label.borrow().as_str(), "Processing...");
        assert!(!page.dialog_log.borrow().open);
        Ok(())
    }
}
