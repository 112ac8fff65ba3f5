use stitchtrack_core::SessionUser;
use stitchtrack_domain::{AuditRow, EnabledUser};

use super::AuditDashboardController;
use crate::view_ports::{InspectorOption, RenderedRow};

/// Returns the status dropdown value pre-selected for a fetched result.
///
/// Only the two submittable values are selectable; anything else (blank,
/// `Pending`, odd casings) leaves the dropdown on its empty entry.
pub(super) fn preselected_result(audit_result: &str) -> String {
    match audit_result {
        "Pass" | "Fail" => audit_result.to_owned(),
        _ => String::new(),
    }
}

fn display_text(value: &str) -> String {
    if value.is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

fn display_qty(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl AuditDashboardController {
    /// Builds the view model for one fetched row.
    ///
    /// Pure: the same row, roster, and session user always produce the
    /// same output. The row's recorded inspector is pre-selected when
    /// present; otherwise the session user is, as a display default only.
    #[must_use]
    pub fn render_row(
        row: &AuditRow,
        roster: &[EnabledUser],
        session_user: &SessionUser,
    ) -> RenderedRow {
        let inspector_options = roster
            .iter()
            .map(|user| InspectorOption {
                name: user.name().as_str().to_owned(),
                full_name: user.full_name().to_owned(),
                selected: if row.inspected_by().is_empty() {
                    user.name().as_str() == session_user.name()
                } else {
                    user.name().as_str() == row.inspected_by()
                },
            })
            .collect();

        RenderedRow {
            work_order: row.work_order().as_str().to_owned(),
            style: display_text(row.style()),
            color: display_text(row.color()),
            order_qty: display_qty(row.order_qty()),
            received_qty: display_qty(row.received_qty()),
            vendor: display_text(row.vendor()),
            audit_date: row
                .audit_date()
                .map_or_else(|| "-".to_owned(), |date| date.to_string()),
            result_badge: row.result_badge(),
            fail_marker: row.has_fail_marker(),
            submit_enabled: !row.is_submit_locked(),
            selected_result: preselected_result(row.audit_result()),
            inspector_options,
        }
    }
}
