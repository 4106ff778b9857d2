//! Yes/no confirmation over the page's single shared dialog.
//!
//! Exactly one request is bound to the dialog at a time. Binding a new request
//! replaces the previous one: a replaced async request settles as declined and
//! a replaced callback is dropped without running. The bound request is taken
//! out of its slot when it fires, so a confirm click can run it at most once.
//!
//! Pages without a dialog fall back to the blocking host prompt.

use std::cell::RefCell;

use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::surface::{ConfirmDialog, NativePrompt};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmationRequest {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
        }
    }

    /// Text for the native prompt: the message, or the title when blank.
    pub fn prompt_text(&self) -> &str {
        if self.message.is_empty() {
            &self.title
        } else {
            &self.message
        }
    }
}

type ConfirmCallback = Box<dyn FnOnce() -> Result<()>>;

enum Pending {
    Callback(Option<ConfirmCallback>),
    Decision(oneshot::Sender<bool>),
}

impl Pending {
    fn settle(self, confirmed: bool) {
        match self {
            Pending::Callback(Some(on_confirm)) if confirmed => run_callback(on_confirm),
            Pending::Callback(_) => {}
            Pending::Decision(tx) => {
                let _ = tx.send(confirmed);
            }
        }
    }
}

fn run_callback(on_confirm: ConfirmCallback) {
    if let Err(err) = on_confirm() {
        error!(error = %err, "confirm callback failed");
    }
}

pub struct ConfirmationGate {
    dialog: Option<Box<dyn ConfirmDialog>>,
    prompt: Box<dyn NativePrompt>,
    pending: RefCell<Option<Pending>>,
}

impl ConfirmationGate {
    pub fn new(dialog: Option<Box<dyn ConfirmDialog>>, prompt: Box<dyn NativePrompt>) -> Self {
        Self {
            dialog,
            prompt,
            pending: RefCell::new(None),
        }
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Callback form used by page scripts.
    ///
    /// Without a dialog this blocks on the native prompt, runs `on_confirm` when
    /// accepted and returns the decision. With a dialog it opens the dialog and
    /// returns `false` at once; `on_confirm` runs later from [`Self::resolve_confirmed`].
    pub fn request<C>(&self, request: &ConfirmationRequest, on_confirm: Option<C>) -> bool
    where
        C: FnOnce() -> Result<()> + 'static,
    {
        let on_confirm = on_confirm.map(|f| Box::new(f) as ConfirmCallback);
        match self.dialog.as_deref() {
            None => {
                let accepted = self.prompt.confirm(request.prompt_text());
                Pending::Callback(on_confirm).settle(accepted);
                accepted
            }
            Some(dialog) => {
                self.present(dialog, request, Pending::Callback(on_confirm));
                false
            }
        }
    }

    /// Resolves once the user decides. Dismissal, replacement by a newer
    /// request, or a failed dialog all resolve to `false`.
    pub async fn confirm(&self, request: ConfirmationRequest) -> bool {
        let Some(dialog) = self.dialog.as_deref() else {
            return self.prompt.confirm(request.prompt_text());
        };
        let (tx, rx) = oneshot::channel();
        self.present(dialog, &request, Pending::Decision(tx));
        rx.await.unwrap_or(false)
    }

    /// Confirm-control click. Fires the bound request once, then closes the dialog.
    pub fn resolve_confirmed(&self) {
        let pending = self.pending.borrow_mut().take();
        let Some(pending) = pending else {
            debug!("confirm clicked with nothing bound");
            return;
        };
        pending.settle(true);
        if let Some(dialog) = self.dialog.as_deref() {
            if let Err(err) = dialog.close() {
                warn!(error = %err, "failed to close confirmation dialog");
            }
        }
    }

    /// Dialog dismissed without confirming. The bound callback never runs.
    pub fn resolve_dismissed(&self) {
        let pending = self.pending.borrow_mut().take();
        if let Some(pending) = pending {
            debug!("confirmation dismissed");
            pending.settle(false);
        }
    }

    fn present(&self, dialog: &dyn ConfirmDialog, request: &ConfirmationRequest, pending: Pending) {
        if !request.title.is_empty() {
            dialog.set_title(&request.title);
        }
        if !request.message.is_empty() {
            dialog.set_message(&request.message);
        }
        if !request.confirm_label.is_empty() {
            dialog.set_confirm_label(&request.confirm_label);
        }

        let replaced = self.pending.borrow_mut().replace(pending);
        if let Some(replaced) = replaced {
            debug!("replacing pending confirmation");
            replaced.settle(false);
        }

        if let Err(err) = dialog.open() {
            warn!(error = %err, "confirmation dialog failed to open, using native prompt");
            let accepted = self.prompt.confirm(request.prompt_text());
            let pending = self.pending.borrow_mut().take();
            if let Some(pending) = pending {
                pending.settle(accepted);
            }
        }
    }
}
