//! Global helpers exported to page scripts.
//!
//! Templates call these by their historical camelCase names
//! (`showConfirmModal`, `showLoading`, ...). Each one reaches the page
//! singletons through `state`.

use lm_ui_core::amount::{AmountRule, validate_payment_amount};
use lm_ui_core::charts::{self, SeriesInput};
use lm_ui_core::guard::{ConfirmationSpec, MessageValues};
use lm_ui_core::{ConfirmationRequest, UiError, prompts};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;

use crate::dom;
use crate::state;

fn js_callback(on_confirm: Option<js_sys::Function>) -> Option<impl FnOnce() -> lm_ui_core::Result<()>> {
    on_confirm.map(|f| {
        move || {
            f.call0(&JsValue::NULL)
                .map(|_| ())
                .map_err(|e| UiError::Callback(dom::js_err(&e)))
        }
    })
}

// ── Loading overlay ──

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(message: Option<String>) {
    state::overlay().show(message.as_deref());
}

#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading() {
    state::overlay().hide();
}

// ── Confirmation ──

/// Opens the shared dialog and returns `false`, or blocks on the native
/// prompt when the page has no dialog and returns its answer.
#[wasm_bindgen(js_name = showConfirmModal)]
pub fn show_confirm_modal(
    title: Option<String>,
    message: Option<String>,
    on_confirm: Option<js_sys::Function>,
    confirm_text: Option<String>,
) -> bool {
    let request = ConfirmationRequest::new(
        title.unwrap_or_default(),
        message.unwrap_or_default(),
        confirm_text.unwrap_or_default(),
    );
    state::gate().request(&request, js_callback(on_confirm))
}

#[wasm_bindgen(js_name = confirmAction)]
pub fn confirm_action(message: String, on_confirm: Option<js_sys::Function>) -> bool {
    state::gate().request(&prompts::action(&message), js_callback(on_confirm))
}

#[wasm_bindgen(js_name = confirmStatusChange)]
pub fn confirm_status_change(member_id: String, current_status: String, new_status: String) -> bool {
    let request = prompts::status_change(&member_id, &current_status, &new_status);
    state::gate().request(&request, js_callback(None))
}

#[wasm_bindgen(js_name = confirmFinePayment)]
pub fn confirm_fine_payment(loan_id: String, amount: f64, balance: f64) -> bool {
    let request = ConfirmationSpec::payment().render(&MessageValues {
        loan_id: Some(loan_id),
        amount: Some(amount),
        balance: Some(balance),
    });
    state::gate().request(&request, js_callback(None))
}

#[wasm_bindgen(js_name = confirmExport)]
pub fn confirm_export(format: String, report_name: String) -> bool {
    dom::window()
        .confirm_with_message(&prompts::export(&format, &report_name))
        .unwrap_or(false)
}

/// Accepts a number or the raw input string.
#[wasm_bindgen(js_name = validatePaymentAmount)]
pub fn validate_payment_amount_js(amount: JsValue, balance: f64) -> bool {
    let amount = amount
        .as_f64()
        .or_else(|| amount.as_string().map(|s| AmountRule::parse(&s)))
        .unwrap_or(0.0);
    validate_payment_amount(amount, balance)
}

// ── Reports ──

#[wasm_bindgen(js_name = getChartColors)]
pub fn get_chart_colors(count: i32) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(&charts::chart_colors(charts::palette_len(count)))?)
}

#[wasm_bindgen(js_name = formatChartData)]
pub fn format_chart_data(data: JsValue, series_type: Option<String>) -> Result<JsValue, JsValue> {
    let input = if data.is_null() || data.is_undefined() {
        None
    } else {
        Some(serde_wasm_bindgen::from_value::<SeriesInput>(data)?)
    };
    let chart = charts::format_chart_data(input, series_type.as_deref());
    Ok(serde_wasm_bindgen::to_value(&chart)?)
}

#[wasm_bindgen(js_name = printReport)]
pub fn print_report() -> Result<(), JsValue> {
    dom::window().print()
}

/// Empties the date inputs and resubmits their form.
#[wasm_bindgen(js_name = clearDateRange)]
pub fn clear_date_range() -> Result<(), JsValue> {
    let start = dom::by_id_typed::<HtmlInputElement>("start_date");
    let end = dom::by_id_typed::<HtmlInputElement>("end_date");
    for input in start.iter().chain(end.iter()) {
        input.set_value("");
    }
    let form = start
        .as_ref()
        .and_then(|i| i.form())
        .or_else(|| end.as_ref().and_then(|i| i.form()))
        .or_else(|| {
            dom::query(".date-range-form").and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
        });
    match form {
        Some(form) => form.submit(),
        None => Ok(()),
    }
}

// ── Filters ──

fn reload_without_query() -> Result<(), JsValue> {
    let location = dom::window().location();
    let path = location.pathname()?;
    debug!(path = %path, "clearing list filters");
    location.set_href(&path)
}

#[wasm_bindgen(js_name = clearCirculationFilters)]
pub fn clear_circulation_filters() -> Result<(), JsValue> {
    reload_without_query()
}

#[wasm_bindgen(js_name = clearMembersFilters)]
pub fn clear_members_filters() -> Result<(), JsValue> {
    reload_without_query()
}

// ── Auth ──

#[wasm_bindgen(js_name = togglePasswordVisibility)]
pub fn toggle_password_visibility(field_id: String) {
    if let Some(input) = dom::by_id_typed::<HtmlInputElement>(&field_id) {
        dom::toggle_password_visibility(&input);
    }
}
