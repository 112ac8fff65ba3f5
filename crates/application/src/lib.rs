//! Application services and ports.

#![forbid(unsafe_code)]

mod cancellation_service;
mod dashboard_service;
mod hierarchy_service;
mod store_ports;
mod view_ports;

pub use cancellation_service::{CancellationOutcome, CancellationService};
pub use dashboard_service::{
    AuditDashboardController, DebounceTicket, LoadOutcome, SearchDebouncer, SubmitOutcome,
};
pub use hierarchy_service::HierarchySyncEngine;
pub use store_ports::{
    AuditSubmission, CancellationCheck, ConfirmationPrompt, DocumentGateway, InsertedDocument,
    SubmitReceipt, SubmitStatus, UserDirectory, WorkOrderGateway,
};
pub use view_ports::{
    DashboardView, GridPane, GridPresenter, InspectorOption, Notice, NoticeLevel, RenderedRow,
};
