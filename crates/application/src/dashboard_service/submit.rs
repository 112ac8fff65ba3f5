use chrono::Local;
use serde_json::json;
use stitchtrack_core::{AppError, AppResult, NonEmptyString};

use super::AuditDashboardController;
use crate::store_ports::AuditSubmission;
use crate::view_ports::Notice;

/// Result of one audit submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store accepted the decision and the list was reloaded.
    Submitted,
    /// No audit result was selected; no remote call was made.
    MissingResult,
    /// The row already passed audit; no remote call was made.
    Locked,
    /// The store rejected the decision; the row state is untouched.
    Rejected,
    /// The remote call failed; the row state is untouched.
    Failed,
}

impl AuditDashboardController {
    /// Submits the locally selected audit decision for one work order.
    ///
    /// Reads exclusively from the canonical row store. Validation
    /// failures surface as notices and make zero remote calls; a
    /// successful submission re-fetches the whole unfiltered list so the
    /// dashboard always reflects the store's state. Nothing is retried
    /// automatically.
    pub async fn submit_audit(&self, work_order: &str) -> AppResult<SubmitOutcome> {
        let selection = self.row_selection(work_order).ok_or_else(|| {
            AppError::NotFound(format!("work order '{work_order}' is not on the dashboard"))
        })?;

        if selection.audit_result.is_empty() {
            self.view.notify(Notice::warning("Please select Audit Result"));
            return Ok(SubmitOutcome::MissingResult);
        }

        if selection.locked {
            self.view.notify(Notice::warning(
                "Audit already passed. Changes are not allowed.",
            ));
            return Ok(SubmitOutcome::Locked);
        }

        let submission = AuditSubmission {
            work_order: work_order.to_owned(),
            audit_result: selection.audit_result,
            inspected_by: selection.inspected_by,
            style: selection.style,
            color: selection.color,
            order_qty: selection.order_qty,
            audit_date: Local::now().date_naive(),
        };

        match self.work_orders.create_aql_audit(submission).await {
            Ok(receipt) if receipt.is_success() => {
                self.view.notify(Notice::success(receipt.message));
                self.load_work_orders("").await;
                Ok(SubmitOutcome::Submitted)
            }
            Ok(receipt) => {
                self.view.notify(Notice::error(receipt.message));
                Ok(SubmitOutcome::Rejected)
            }
            Err(error) => {
                self.view.notify(Notice::error(error.to_string()));
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Creates a bare audit record linked to a work order through the
    /// generic document insert contract and surfaces the created name.
    pub async fn create_audit_shell(&self, work_order: &str) -> AppResult<NonEmptyString> {
        if work_order.trim().is_empty() {
            self.view.notify(Notice::warning("Please select a Work Order"));
            return Err(AppError::Validation(
                "a work order is required to create an audit".to_owned(),
            ));
        }

        let inserted = self
            .documents
            .insert_document("AQL Audit", json!({ "work_order": work_order }))
            .await
            .inspect_err(|error| self.view.notify(Notice::error(error.to_string())))?;

        self.view.notify(Notice::success(format!(
            "New AQL Audit created: {}",
            inserted.name.as_str()
        )));
        Ok(inserted.name)
    }
}
