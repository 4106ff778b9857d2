//! Page-lifetime singletons.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Guards receive their overlay and gate handles at construction; the
//! exported page functions reach the same instances through here.

use std::cell::RefCell;
use std::rc::Rc;

use lm_ui_core::{ConfirmationGate, LoadingOverlay, UiConfig};

use crate::handles::WindowPrompt;

pub struct Page {
    pub config: UiConfig,
    pub overlay: Rc<LoadingOverlay>,
    pub gate: Rc<ConfirmationGate>,
}

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

pub fn install(page: Page) -> Rc<Page> {
    let page = Rc::new(page);
    PAGE.with(|p| *p.borrow_mut() = Some(Rc::clone(&page)));
    page
}

/// The installed page, or a detached fallback when called before startup
/// finished (no overlay, native prompt only).
pub fn page() -> Rc<Page> {
    if let Some(page) = PAGE.with(|p| p.borrow().clone()) {
        return page;
    }
    Rc::new(Page {
        config: UiConfig::default(),
        overlay: Rc::new(LoadingOverlay::detached()),
        gate: Rc::new(ConfirmationGate::new(None, Box::new(WindowPrompt))),
    })
}

pub fn overlay() -> Rc<LoadingOverlay> {
    Rc::clone(&page().overlay)
}

pub fn gate() -> Rc<ConfirmationGate> {
    Rc::clone(&page().gate)
}
