//! In-memory page handles for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::error::{Result, UiError};
use crate::surface::{
    ConfirmDialog, FieldHandle, FormHandle, Marked, NativePrompt, OverlaySurface, SubmitControl,
};

#[derive(Default)]
pub struct Classes(RefCell<BTreeSet<String>>);

impl Classes {
    fn add(&self, class: &str) {
        self.0.borrow_mut().insert(class.to_owned());
    }

    fn remove(&self, class: &str) {
        self.0.borrow_mut().remove(class);
    }

    fn has(&self, class: &str) -> bool {
        self.0.borrow().contains(class)
    }
}

// ── Field ──

#[derive(Default)]
pub struct FieldState {
    id: String,
    value: RefCell<String>,
    required: bool,
    classes: Classes,
    focused: Cell<bool>,
    scrolled: Cell<bool>,
}

#[derive(Clone)]
pub struct MockField(Rc<FieldState>);

impl MockField {
    pub fn new(id: &str, value: &str) -> Self {
        Self(Rc::new(FieldState {
            id: id.to_owned(),
            value: RefCell::new(value.to_owned()),
            ..FieldState::default()
        }))
    }

    /// Required field, initially empty.
    pub fn required(id: &str) -> Self {
        Self(Rc::new(FieldState {
            id: id.to_owned(),
            required: true,
            ..FieldState::default()
        }))
    }

    pub fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_owned();
    }

    pub fn focused(&self) -> bool {
        self.0.focused.get()
    }

    pub fn scrolled(&self) -> bool {
        self.0.scrolled.get()
    }
}

impl Marked for MockField {
    fn add_class(&self, class: &str) {
        self.0.classes.add(class);
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.has(class)
    }
}

impl FieldHandle for MockField {
    fn check_validity(&self) -> bool {
        !self.0.required || !self.0.value.borrow().trim().is_empty()
    }

    fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn focus(&self) {
        self.0.focused.set(true);
    }

    fn scroll_into_view(&self) {
        self.0.scrolled.set(true);
    }
}

// ── Submit control ──

#[derive(Default)]
pub struct ControlState {
    pub disabled: Cell<bool>,
    pub label: RefCell<String>,
    pub spinner: Cell<bool>,
    pub loading_text: RefCell<Option<String>>,
}

#[derive(Clone)]
pub struct MockControl(Rc<ControlState>);

impl SubmitControl for MockControl {
    fn disable(&self) {
        self.0.disabled.set(true);
    }

    fn loading_text(&self) -> Option<String> {
        self.0.loading_text.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.0.label.borrow_mut() = label.to_owned();
    }

    fn reveal_spinner(&self) {
        self.0.spinner.set(true);
    }
}

// ── Form ──

#[derive(Default)]
pub struct MockForm {
    fields: RefCell<Vec<MockField>>,
    data: RefCell<HashMap<String, String>>,
    help_text: RefCell<Option<String>>,
    classes: Classes,
    control: Rc<ControlState>,
    submits: Cell<u32>,
    fail_submit: Cell<bool>,
}

impl MockForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&self, field: MockField) {
        self.fields.borrow_mut().push(field);
    }

    pub fn set_data(&self, key: &str, value: &str) {
        self.data.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    pub fn set_help_text(&self, text: &str) {
        *self.help_text.borrow_mut() = Some(text.to_owned());
    }

    pub fn control(&self) -> Rc<ControlState> {
        Rc::clone(&self.control)
    }

    pub fn submits(&self) -> u32 {
        self.submits.get()
    }

    pub fn fail_submit(&self) {
        self.fail_submit.set(true);
    }
}

impl Marked for MockForm {
    fn add_class(&self, class: &str) {
        self.classes.add(class);
    }

    fn remove_class(&self, class: &str) {
        self.classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.has(class)
    }
}

impl FormHandle for MockForm {
    type Field = MockField;
    type Control = MockControl;

    fn check_validity(&self) -> bool {
        self.fields.borrow().iter().all(|f| f.check_validity())
    }

    fn first_invalid(&self) -> Option<MockField> {
        self.fields.borrow().iter().find(|f| !f.check_validity()).cloned()
    }

    fn field(&self, id: &str) -> Option<MockField> {
        self.fields.borrow().iter().find(|f| f.0.id == id).cloned()
    }

    fn submit_control(&self) -> Option<MockControl> {
        Some(MockControl(Rc::clone(&self.control)))
    }

    fn data(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn help_text(&self) -> Option<String> {
        self.help_text.borrow().clone()
    }

    fn submit(&self) -> Result<()> {
        if self.fail_submit.get() {
            return Err(UiError::Submit("navigation refused".to_owned()));
        }
        self.submits.set(self.submits.get() + 1);
        Ok(())
    }
}

// ── Dialog ──

#[derive(Debug, Default)]
pub struct DialogLog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub open: bool,
    pub opens: u32,
    pub fail_open: bool,
}

pub struct MockDialog(Rc<RefCell<DialogLog>>);

impl MockDialog {
    pub fn new() -> (Self, Rc<RefCell<DialogLog>>) {
        let log = Rc::new(RefCell::new(DialogLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl ConfirmDialog for MockDialog {
    fn set_title(&self, title: &str) {
        self.0.borrow_mut().title = title.to_owned();
    }

    fn set_message(&self, message: &str) {
        self.0.borrow_mut().message = message.to_owned();
    }

    fn set_confirm_label(&self, label: &str) {
        self.0.borrow_mut().confirm_label = label.to_owned();
    }

    fn open(&self) -> Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_open {
            return Err(UiError::Widget("bootstrap is not loaded".to_owned()));
        }
        log.open = true;
        log.opens += 1;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.0.borrow_mut().open = false;
        Ok(())
    }
}

// ── Native prompt ──

pub struct MockPrompt {
    answer: bool,
    asked: Rc<RefCell<Vec<String>>>,
}

impl MockPrompt {
    pub fn answering(answer: bool) -> (Self, Rc<RefCell<Vec<String>>>) {
        let asked = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                answer,
                asked: Rc::clone(&asked),
            },
            asked,
        )
    }
}

impl NativePrompt for MockPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_owned());
        self.answer
    }
}

// ── Overlay ──

#[derive(Debug, Default)]
pub struct OverlayLog {
    pub visible: bool,
    pub busy: bool,
    pub message: Option<String>,
    pub reveals: u32,
    pub conceals: u32,
}

pub struct MockOverlay(Rc<RefCell<OverlayLog>>);

impl MockOverlay {
    pub fn new() -> (Self, Rc<RefCell<OverlayLog>>) {
        let log = Rc::new(RefCell::new(OverlayLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl OverlaySurface for MockOverlay {
    fn reveal(&self) {
        let mut log = self.0.borrow_mut();
        log.visible = true;
        log.reveals += 1;
    }

    fn conceal(&self) {
        let mut log = self.0.borrow_mut();
        log.visible = false;
        log.conceals += 1;
    }

    fn set_message(&self, message: &str) {
        self.0.borrow_mut().message = Some(message.to_owned());
    }

    fn set_busy(&self, busy: bool) {
        self.0.borrow_mut().busy = busy;
    }
}
