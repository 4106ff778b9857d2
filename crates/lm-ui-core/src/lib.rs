//! Library Desk UI core.
//!
//! DOM-free behaviour behind the library-management pages: the guarded form
//! submission workflow (native validity, the amount-vs-balance rule, the
//! confirmation gate and the loading overlay) plus the small page helpers the
//! browser bundle exposes. Everything talks to the page through the handle
//! traits in [`surface`], so the browser crate only supplies `web-sys`
//! implementations.

pub mod amount;
pub mod charts;
pub mod config;
pub mod confirm;
pub mod error;
pub mod guard;
pub mod overlay;
pub mod prompts;
pub mod strength;
pub mod surface;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use config::UiConfig;
pub use confirm::{ConfirmationGate, ConfirmationRequest};
pub use error::{Result, UiError};
pub use guard::{BlockReason, FormContext, FormSubmissionGuard, SubmitOutcome};
pub use overlay::{LoadingHold, LoadingOverlay};
pub use validation::ValidationStateSync;
