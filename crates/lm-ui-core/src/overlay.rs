//! Full-page loading overlay.
//!
//! `show`/`hide` are the plain page-level switch: repeated shows are
//! idempotent and one hide always clears. Callers that may overlap take a
//! [`LoadingHold`] instead; the overlay conceals once the last hold drops.
//! A `hide` starts a new epoch: holds taken before it no longer count.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::surface::OverlaySurface;

pub struct LoadingOverlay {
    surface: Option<Box<dyn OverlaySurface>>,
    visible: Cell<bool>,
    holds: Cell<usize>,
    epoch: Cell<u64>,
}

impl LoadingOverlay {
    pub fn new(surface: Box<dyn OverlaySurface>) -> Self {
        Self {
            surface: Some(surface),
            visible: Cell::new(false),
            holds: Cell::new(0),
            epoch: Cell::new(0),
        }
    }

    /// Overlay for pages that declare none: every call is a silent no-op.
    pub fn detached() -> Self {
        Self {
            surface: None,
            visible: Cell::new(false),
            holds: Cell::new(0),
            epoch: Cell::new(0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn holds(&self) -> usize {
        self.holds.get()
    }

    pub fn show(&self, message: Option<&str>) {
        let Some(surface) = self.surface.as_deref() else {
            trace!("no loading overlay on page");
            return;
        };
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            surface.set_message(message);
        }
        surface.reveal();
        surface.set_busy(true);
        self.visible.set(true);
        debug!(text = message.unwrap_or_default(), "loading overlay shown");
    }

    /// Fully hides regardless of how many shows or holds preceded it.
    pub fn hide(&self) {
        let Some(surface) = self.surface.as_deref() else {
            return;
        };
        self.holds.set(0);
        self.epoch.set(self.epoch.get() + 1);
        surface.conceal();
        surface.set_busy(false);
        self.visible.set(false);
        debug!("loading overlay hidden");
    }

    /// Counted visibility request, released on drop.
    pub fn acquire(self: &Rc<Self>, message: Option<&str>) -> LoadingHold {
        self.holds.set(self.holds.get() + 1);
        self.show(message);
        LoadingHold {
            overlay: Rc::clone(self),
            epoch: self.epoch.get(),
        }
    }

    fn release(&self, epoch: u64) {
        if epoch != self.epoch.get() {
            trace!("stale loading hold released");
            return;
        }
        let remaining = self.holds.get().saturating_sub(1);
        self.holds.set(remaining);
        if remaining == 0 && self.visible.get() {
            self.hide();
        }
    }
}

#[must_use = "the overlay hides as soon as the hold is dropped"]
pub struct LoadingHold {
    overlay: Rc<LoadingOverlay>,
    epoch: u64,
}

impl Drop for LoadingHold {
    fn drop(&mut self) {
        self.overlay.release(self.epoch);
    }
}
