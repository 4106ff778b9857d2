//! Confirmation wording for page-level actions.

use crate::confirm::ConfirmationRequest;

/// Member status change prompt, e.g. "Suspend member M-0042?\n(Current: active)".
pub fn status_change(member_id: &str, current_status: &str, new_status: &str) -> ConfirmationRequest {
    let action = match new_status {
        "active" => "Activate".to_owned(),
        "suspended" => "Suspend".to_owned(),
        "expired" => "Mark as Expired".to_owned(),
        other => format!("Change to {other}"),
    };
    let extra = match new_status {
        "suspended" => "\nThis will prevent the member from borrowing books.",
        "expired" => "\nThe member will need to renew to borrow again.",
        _ => "",
    };
    ConfirmationRequest::new(
        "Confirm Status Change",
        format!("{action} member {member_id}?\n(Current: {current_status}){extra}"),
        "Confirm",
    )
}

pub fn export(format: &str, report_name: &str) -> String {
    format!("Export {report_name} as {format}?")
}

/// Generic prompt behind `confirmAction`.
pub fn action(message: &str) -> ConfirmationRequest {
    ConfirmationRequest::new("Confirm", message, "Confirm")
}
