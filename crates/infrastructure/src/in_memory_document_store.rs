use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use stitchtrack_application::{
    AuditSubmission, CancellationCheck, DocumentGateway, InsertedDocument, SubmitReceipt,
    SubmitStatus, UserDirectory, WorkOrderGateway,
};
use stitchtrack_core::{AppResult, NonEmptyString};
use stitchtrack_domain::{AuditRow, EnabledUser};
use tokio::sync::RwLock;

const WORK_ORDER_PAGE_SIZE: usize = 50;

/// A work order seeded into the in-memory store, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWorkOrder {
    /// Work order name, the row key.
    pub name: String,
    /// Style taken from the produced item.
    pub style: String,
    /// Colour taken from the produced item.
    pub color: String,
    /// Quantity to manufacture.
    pub qty: f64,
}

/// A tracking order seeded for cancellation checks.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTrackingOrder {
    /// Tracking order name.
    pub name: String,
    /// Order status; `In Production` and `Completed` gate cancellation.
    pub order_status: String,
    /// Units produced so far.
    pub produced_quantity: f64,
    /// Total units ordered.
    pub quantity: f64,
    /// The bundle document this order was created from.
    pub reference_order_number: String,
}

#[derive(Debug, Clone, PartialEq)]
struct StoredAudit {
    audit_result: String,
    style: String,
    color: String,
    order_qty: f64,
    audit_date: Option<NaiveDate>,
    inspected_by: String,
}

/// In-memory document store used by tests and local runs.
///
/// Reproduces the server-side merge the dashboard observes: audit fields
/// override work order defaults, passed work orders drop off the list,
/// and submissions upsert one audit per work order.
pub struct InMemoryDocumentStore {
    session_user: String,
    work_orders: RwLock<Vec<StoredWorkOrder>>,
    audits: RwLock<HashMap<String, StoredAudit>>,
    users: RwLock<Vec<EnabledUser>>,
    tracking_orders: RwLock<Vec<StoredTrackingOrder>>,
    cancelled: RwLock<Vec<(String, String)>>,
    inserted: RwLock<Vec<(String, Value)>>,
    insert_counter: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Creates an empty store resolving defaults to the given session
    /// user.
    #[must_use]
    pub fn new(session_user: impl Into<String>) -> Self {
        Self {
            session_user: session_user.into(),
            work_orders: RwLock::new(Vec::new()),
            audits: RwLock::new(HashMap::new()),
            users: RwLock::new(Vec::new()),
            tracking_orders: RwLock::new(Vec::new()),
            cancelled: RwLock::new(Vec::new()),
            inserted: RwLock::new(Vec::new()),
            insert_counter: AtomicU64::new(0),
        }
    }

    /// Seeds a work order; later additions are treated as newer.
    pub async fn add_work_order(&self, work_order: StoredWorkOrder) {
        self.work_orders.write().await.push(work_order);
    }

    /// Seeds an enabled user.
    pub async fn add_user(&self, user: EnabledUser) {
        self.users.write().await.push(user);
    }

    /// Seeds a tracking order for cancellation checks.
    pub async fn add_tracking_order(&self, tracking_order: StoredTrackingOrder) {
        self.tracking_orders.write().await.push(tracking_order);
    }

    /// Returns every document cancelled through the gateway.
    pub async fn cancelled_documents(&self) -> Vec<(String, String)> {
        self.cancelled.read().await.clone()
    }

    /// Returns every document inserted through the gateway.
    pub async fn inserted_documents(&self) -> Vec<(String, Value)> {
        self.inserted.read().await.clone()
    }
}

#[async_trait]
impl WorkOrderGateway for InMemoryDocumentStore {
    async fn get_work_orders(&self, search: &str) -> AppResult<Vec<AuditRow>> {
        let work_orders = self.work_orders.read().await;
        let audits = self.audits.read().await;
        let needle = search.to_lowercase();

        let mut rows = Vec::new();
        for work_order in work_orders.iter().rev() {
            if !needle.is_empty() && !work_order.name.to_lowercase().contains(&needle) {
                continue;
            }

            let audit = audits.get(&work_order.name);
            if audit
                .map(|audit| audit.audit_result.eq_ignore_ascii_case("pass"))
                .unwrap_or(false)
            {
                continue;
            }

            let row = match audit {
                Some(audit) => AuditRow::new(
                    work_order.name.clone(),
                    non_empty_or(&audit.style, &work_order.style),
                    non_empty_or(&audit.color, &work_order.color),
                    if audit.order_qty > 0.0 {
                        audit.order_qty
                    } else {
                        work_order.qty
                    },
                    0.0,
                    "",
                    audit.audit_date,
                    non_empty_or(&audit.audit_result, "Pending"),
                    non_empty_or(&audit.inspected_by, &self.session_user),
                )?,
                None => AuditRow::new(
                    work_order.name.clone(),
                    work_order.style.clone(),
                    work_order.color.clone(),
                    work_order.qty,
                    0.0,
                    "",
                    None,
                    "Pending",
                    self.session_user.clone(),
                )?,
            };

            rows.push(row);
            if rows.len() == WORK_ORDER_PAGE_SIZE {
                break;
            }
        }

        Ok(rows)
    }

    async fn create_aql_audit(&self, submission: AuditSubmission) -> AppResult<SubmitReceipt> {
        let known = self
            .work_orders
            .read()
            .await
            .iter()
            .any(|work_order| work_order.name == submission.work_order);
        if !known {
            return Ok(SubmitReceipt {
                status: SubmitStatus::Error,
                message: format!("Work Order '{}' was not found", submission.work_order),
            });
        }

        let inspected_by = non_empty_or(&submission.inspected_by, &self.session_user);
        let mut audits = self.audits.write().await;
        let existed = audits
            .insert(
                submission.work_order.clone(),
                StoredAudit {
                    audit_result: submission.audit_result,
                    style: submission.style,
                    color: submission.color,
                    order_qty: submission.order_qty,
                    audit_date: Some(Local::now().date_naive()),
                    inspected_by,
                },
            )
            .is_some();

        let message = if existed {
            format!("AQL Audit updated for {}", submission.work_order)
        } else {
            format!("AQL Audit created for {}", submission.work_order)
        };

        Ok(SubmitReceipt {
            status: SubmitStatus::Success,
            message,
        })
    }
}

#[async_trait]
impl UserDirectory for InMemoryDocumentStore {
    async fn get_enabled_users(&self) -> AppResult<Vec<EnabledUser>> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl DocumentGateway for InMemoryDocumentStore {
    async fn check_tracking_order_status(&self, bundle_id: &str) -> AppResult<CancellationCheck> {
        let tracking_orders = self.tracking_orders.read().await;
        let Some(tracking_order) = tracking_orders
            .iter()
            .find(|tracking_order| tracking_order.reference_order_number == bundle_id)
        else {
            return Ok(CancellationCheck {
                needs_confirmation: false,
                confirmation_message: String::new(),
            });
        };

        let confirmation_message = match tracking_order.order_status.as_str() {
            "Completed" => {
                let produced = if tracking_order.produced_quantity > 0.0 {
                    tracking_order.produced_quantity
                } else {
                    tracking_order.quantity
                };
                format!(
                    "This bundle has a completed tracking order ('{}'); all {} units have been produced.",
                    tracking_order.name, produced
                )
            }
            "In Production" => format!(
                "This bundle has a tracking order ('{}') currently in production; {} out of {} units have been produced.",
                tracking_order.name,
                tracking_order.produced_quantity,
                tracking_order.quantity
            ),
            _ => {
                return Ok(CancellationCheck {
                    needs_confirmation: false,
                    confirmation_message: String::new(),
                });
            }
        };

        Ok(CancellationCheck {
            needs_confirmation: true,
            confirmation_message,
        })
    }

    async fn cancel_document(&self, doctype: &str, name: &str) -> AppResult<()> {
        self.cancelled
            .write()
            .await
            .push((doctype.to_owned(), name.to_owned()));
        Ok(())
    }

    async fn insert_document(&self, doctype: &str, fields: Value) -> AppResult<InsertedDocument> {
        let sequence = self.insert_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let prefix = doctype.to_uppercase().replace(' ', "-");
        let name = NonEmptyString::new(format!("{prefix}-{sequence:05}"))?;

        self.inserted.write().await.push((doctype.to_owned(), fields));
        Ok(InsertedDocument { name })
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}
