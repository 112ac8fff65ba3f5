use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use stitchtrack_core::{AppResult, NonEmptyString};
use stitchtrack_domain::{AuditRow, EnabledUser};

/// One audit decision submitted for a work order.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSubmission {
    /// The audited work order name.
    pub work_order: String,
    /// The selected result, `Pass` or `Fail`.
    pub audit_result: String,
    /// The selected inspector user name.
    pub inspected_by: String,
    /// Style carried over from the rendered row.
    pub style: String,
    /// Colour carried over from the rendered row.
    pub color: String,
    /// Ordered quantity carried over from the rendered row.
    pub order_qty: f64,
    /// Date the decision was recorded.
    pub audit_date: NaiveDate,
}

/// Store-reported outcome class of an audit submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The store accepted the submission.
    Success,
    /// The store rejected the submission.
    Error,
}

/// Store response to an audit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Whether the store accepted the submission.
    pub status: SubmitStatus,
    /// Human-readable message to surface to the operator.
    pub message: String,
}

impl SubmitReceipt {
    /// Returns whether the store accepted the submission.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SubmitStatus::Success
    }
}

/// Store answer to a pre-cancellation status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationCheck {
    /// Whether the operator must confirm before cancelling.
    pub needs_confirmation: bool,
    /// Server-computed message shown in the confirmation prompt.
    pub confirmation_message: String,
}

/// Name assigned by the store to a newly inserted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedDocument {
    /// The generated document name.
    pub name: NonEmptyString,
}

/// Work order fetch and audit submission operations.
#[async_trait]
pub trait WorkOrderGateway: Send + Sync {
    /// Fetches work orders awaiting audit; an empty search is unfiltered.
    async fn get_work_orders(&self, search: &str) -> AppResult<Vec<AuditRow>>;

    /// Records one audit decision for a work order.
    async fn create_aql_audit(&self, submission: AuditSubmission) -> AppResult<SubmitReceipt>;
}

/// Read access to the platform's enabled user roster.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetches every enabled user.
    async fn get_enabled_users(&self) -> AppResult<Vec<EnabledUser>>;
}

/// Generic document operations delegated to the backing store.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// Asks whether cancelling the bundle's documents needs confirmation.
    async fn check_tracking_order_status(&self, bundle_id: &str) -> AppResult<CancellationCheck>;

    /// Cancels a document in the backing store.
    async fn cancel_document(&self, doctype: &str, name: &str) -> AppResult<()>;

    /// Inserts a new document and returns its generated name.
    async fn insert_document(&self, doctype: &str, fields: Value) -> AppResult<InsertedDocument>;
}

/// Confirmation dialog presented by the surrounding toolkit.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Shows the message and resolves to the operator's choice.
    async fn confirm(&self, message: &str) -> AppResult<bool>;
}
