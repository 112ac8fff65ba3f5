use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stitchtrack_core::{AppResult, NonEmptyString};

/// Visual classification of an audit result string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditResultBadge {
    /// No decision recorded yet.
    Pending,
    /// Audit passed.
    Pass,
    /// Audit failed.
    Fail,
}

/// One work order awaiting audit, as returned by the backing store.
///
/// Rows are ephemeral: created by a dashboard fetch, edited only through
/// the two dashboard selects, and replaced wholesale by the next reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    work_order: NonEmptyString,
    style: String,
    color: String,
    order_qty: f64,
    received_qty: f64,
    vendor: String,
    audit_date: Option<NaiveDate>,
    audit_result: String,
    inspected_by: String,
}

impl AuditRow {
    /// Creates an audit row from fetched work order data.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        work_order: impl Into<String>,
        style: impl Into<String>,
        color: impl Into<String>,
        order_qty: f64,
        received_qty: f64,
        vendor: impl Into<String>,
        audit_date: Option<NaiveDate>,
        audit_result: impl Into<String>,
        inspected_by: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            work_order: NonEmptyString::new(work_order)?,
            style: style.into(),
            color: color.into(),
            order_qty,
            received_qty,
            vendor: vendor.into(),
            audit_date,
            audit_result: audit_result.into(),
            inspected_by: inspected_by.into(),
        })
    }

    /// Returns the work order name, the row's primary key.
    #[must_use]
    pub fn work_order(&self) -> &NonEmptyString {
        &self.work_order
    }

    /// Returns the style name.
    #[must_use]
    pub fn style(&self) -> &str {
        self.style.as_str()
    }

    /// Returns the colour name.
    #[must_use]
    pub fn color(&self) -> &str {
        self.color.as_str()
    }

    /// Returns the ordered quantity.
    #[must_use]
    pub fn order_qty(&self) -> f64 {
        self.order_qty
    }

    /// Returns the received quantity.
    #[must_use]
    pub fn received_qty(&self) -> f64 {
        self.received_qty
    }

    /// Returns the vendor name.
    #[must_use]
    pub fn vendor(&self) -> &str {
        self.vendor.as_str()
    }

    /// Returns the recorded audit date, if any.
    #[must_use]
    pub fn audit_date(&self) -> Option<NaiveDate> {
        self.audit_date
    }

    /// Returns the stored audit result string, verbatim.
    #[must_use]
    pub fn audit_result(&self) -> &str {
        self.audit_result.as_str()
    }

    /// Returns the recorded inspector, empty when unassigned.
    #[must_use]
    pub fn inspected_by(&self) -> &str {
        self.inspected_by.as_str()
    }

    /// Classifies the result string for the row badge, ignoring case.
    #[must_use]
    pub fn result_badge(&self) -> AuditResultBadge {
        match self.audit_result.to_lowercase().as_str() {
            "pass" => AuditResultBadge::Pass,
            "fail" => AuditResultBadge::Fail,
            _ => AuditResultBadge::Pending,
        }
    }

    /// Returns whether the row carries the red failure highlight.
    ///
    /// Matches `fail` in any casing, unlike [`AuditRow::is_submit_locked`]
    /// which only matches the canonical value the server writes. Both
    /// behaviors are preserved exactly as the dashboard has always shown
    /// them.
    #[must_use]
    pub fn has_fail_marker(&self) -> bool {
        self.audit_result.eq_ignore_ascii_case("fail")
    }

    /// Returns whether the submit control is permanently disabled.
    #[must_use]
    pub fn is_submit_locked(&self) -> bool {
        self.audit_result == "Pass"
    }
}

#[cfg(test)]
mod tests {
    use super::{AuditResultBadge, AuditRow};

    fn row(audit_result: &str) -> AuditRow {
        AuditRow::new(
            "WO-1001",
            "Crew Tee",
            "Indigo",
            120.0,
            0.0,
            "",
            None,
            audit_result,
            "",
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn fail_marker_ignores_case() {
        assert!(row("Fail").has_fail_marker());
        assert!(row("fail").has_fail_marker());
        assert!(!row("Pass").has_fail_marker());
        assert!(!row("").has_fail_marker());
    }

    #[test]
    fn submit_lock_matches_only_the_canonical_pass() {
        assert!(row("Pass").is_submit_locked());
        assert!(!row("pass").is_submit_locked());
        assert!(!row("PASS").is_submit_locked());
        assert!(!row("Fail").is_submit_locked());
    }

    #[test]
    fn badge_classification_ignores_case() {
        assert_eq!(row("pass").result_badge(), AuditResultBadge::Pass);
        assert_eq!(row("FAIL").result_badge(), AuditResultBadge::Fail);
        assert_eq!(row("Pending").result_badge(), AuditResultBadge::Pending);
        assert_eq!(row("").result_badge(), AuditResultBadge::Pending);
    }

    #[test]
    fn rows_require_a_work_order_name() {
        let result = AuditRow::new("", "", "", 0.0, 0.0, "", None, "", "");
        assert!(result.is_err());
    }
}
