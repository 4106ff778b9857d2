//! Host-markup contract and tunables.
//!
//! Pages may embed a JSON object in `<script type="application/json" id="ui-config">`;
//! any key left out keeps its default.

use serde::Deserialize;

use crate::error::Result;

pub const CONFIG_ELEMENT_ID: &str = "ui-config";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub confirm_modal_id: String,
    pub confirm_title_id: String,
    pub confirm_message_id: String,
    pub confirm_button_id: String,

    pub overlay_id: String,
    pub overlay_text_id: String,

    pub guarded_form_selector: String,
    pub validation_form_class: String,
    pub loading_form_class: String,
    pub amount_field_id: String,
    pub help_text_selector: String,
    pub processing_label: String,

    pub flash_selector: String,
    pub flash_dismiss_ms: u32,
    pub pagination_link_selector: String,
    pub scroll_storage_key: String,

    pub password_input_id: String,
    pub password_bar_id: String,
    pub password_text_id: String,

    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_modal_id: "confirmModal".to_owned(),
            confirm_title_id: "confirmModalTitle".to_owned(),
            confirm_message_id: "confirmModalMessage".to_owned(),
            confirm_button_id: "confirmModalBtn".to_owned(),
            overlay_id: "loading-overlay".to_owned(),
            overlay_text_id: "loading-overlay-text".to_owned(),
            guarded_form_selector: "form.needs-validation, form.needs-loading".to_owned(),
            validation_form_class: "needs-validation".to_owned(),
            loading_form_class: "needs-loading".to_owned(),
            amount_field_id: "payment_amount".to_owned(),
            help_text_selector: ".form-text".to_owned(),
            processing_label: "Processing...".to_owned(),
            flash_selector: "#flash-container .alert".to_owned(),
            flash_dismiss_ms: 5_000,
            pagination_link_selector: ".pagination a.page-link".to_owned(),
            scroll_storage_key: "scrollYBeforePageChange".to_owned(),
            password_input_id: "reg_password".to_owned(),
            password_bar_id: "pwdStrengthBar".to_owned(),
            password_text_id: "pwdStrengthText".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse an embedded config block. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}
