use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stitchtrack_core::{AppError, AppResult, SessionUser};
use stitchtrack_domain::{AuditRow, EnabledUser};

use crate::store_ports::{DocumentGateway, UserDirectory, WorkOrderGateway};
use crate::view_ports::{DashboardView, RenderedRow};

mod debounce;
mod render;
mod submit;

pub use debounce::{DebounceTicket, SearchDebouncer};
pub use submit::SubmitOutcome;


/// Result of one dashboard list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were fetched and rendered.
    Rendered(usize),
    /// The fetch succeeded but matched nothing.
    Empty,
    /// A newer load was issued before this one resolved; nothing rendered.
    Superseded,
    /// The fetch failed; the failure placeholder was rendered.
    Failed,
}

/// Locally edited, not-yet-submitted state of one dashboard row.
///
/// This store is the single source of truth for submissions; nothing is
/// ever read back out of rendered output.
#[derive(Debug, Clone, PartialEq)]
struct RowSelection {
    audit_result: String,
    inspected_by: String,
    style: String,
    color: String,
    order_qty: f64,
    locked: bool,
}

/// Drives the audit dashboard: fetches, renders, collects row edits, and
/// submits one audit decision per row.
pub struct AuditDashboardController {
    work_orders: Arc<dyn WorkOrderGateway>,
    users: Arc<dyn UserDirectory>,
    documents: Arc<dyn DocumentGateway>,
    view: Arc<dyn DashboardView>,
    session_user: SessionUser,
    roster: Mutex<Option<Vec<EnabledUser>>>,
    row_states: Mutex<HashMap<String, RowSelection>>,
    request_sequence: AtomicU64,
}

impl AuditDashboardController {
    /// Creates a controller over the store gateways and the view surface.
    #[must_use]
    pub fn new(
        work_orders: Arc<dyn WorkOrderGateway>,
        users: Arc<dyn UserDirectory>,
        documents: Arc<dyn DocumentGateway>,
        view: Arc<dyn DashboardView>,
        session_user: SessionUser,
    ) -> Self {
        Self {
            work_orders,
            users,
            documents,
            view,
            session_user,
            roster: Mutex::new(None),
            row_states: Mutex::new(HashMap::new()),
            request_sequence: AtomicU64::new(0),
        }
    }

    /// Fetches the enabled user roster once and memoizes it for the
    /// controller's lifetime; later calls return the cache unchanged.
    pub async fn load_users_list(&self) -> AppResult<Vec<EnabledUser>> {
        if let Some(cached) = lock(&self.roster).clone() {
            return Ok(cached);
        }

        let fetched = self.users.get_enabled_users().await?;
        let mut roster = lock(&self.roster);
        Ok(roster.get_or_insert(fetched).clone())
    }

    /// Loads and renders the work order list; an empty query is
    /// unfiltered.
    ///
    /// The loading placeholder is rendered synchronously before the fetch.
    /// Overlapping calls are tolerated: each load takes a sequence number
    /// and a response that is no longer the latest issued is discarded
    /// without touching the view. A roster fetch failure degrades to empty
    /// inspector dropdowns rather than failing the load.
    pub async fn load_work_orders(&self, query: &str) -> LoadOutcome {
        let ticket = self.request_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.show_loading();

        let roster = self.load_users_list().await.unwrap_or_default();
        let fetched = self.work_orders.get_work_orders(query).await;

        if self.request_sequence.load(Ordering::SeqCst) != ticket {
            return LoadOutcome::Superseded;
        }

        match fetched {
            Err(_) => {
                self.view.show_error("Error loading work orders");
                LoadOutcome::Failed
            }
            Ok(rows) if rows.is_empty() => {
                self.replace_row_states(&rows);
                self.view.show_empty();
                LoadOutcome::Empty
            }
            Ok(rows) => {
                self.replace_row_states(&rows);
                let rendered: Vec<RenderedRow> = rows
                    .iter()
                    .map(|row| Self::render_row(row, &roster, &self.session_user))
                    .collect();
                self.view.show_rows(&rendered);
                LoadOutcome::Rendered(rendered.len())
            }
        }
    }

    /// Records a locally selected audit result for a rendered row.
    pub fn set_audit_result(&self, work_order: &str, value: &str) -> AppResult<()> {
        if !matches!(value, "" | "Pass" | "Fail") {
            return Err(AppError::Validation(format!(
                "audit result must be empty, 'Pass' or 'Fail', got '{value}'"
            )));
        }

        let mut states = lock(&self.row_states);
        let state = Self::row_state_mut(&mut states, work_order)?;
        state.audit_result = value.to_owned();
        Ok(())
    }

    /// Records a locally selected inspector for a rendered row.
    pub fn set_inspector(&self, work_order: &str, user_name: &str) -> AppResult<()> {
        let mut states = lock(&self.row_states);
        let state = Self::row_state_mut(&mut states, work_order)?;
        state.inspected_by = user_name.to_owned();
        Ok(())
    }

    fn row_state_mut<'a>(
        states: &'a mut HashMap<String, RowSelection>,
        work_order: &str,
    ) -> AppResult<&'a mut RowSelection> {
        let state = states.get_mut(work_order).ok_or_else(|| {
            AppError::NotFound(format!("work order '{work_order}' is not on the dashboard"))
        })?;

        if state.locked {
            return Err(AppError::Conflict(format!(
                "work order '{work_order}' has already passed audit"
            )));
        }

        Ok(state)
    }

    fn replace_row_states(&self, rows: &[AuditRow]) {
        let mut states = lock(&self.row_states);
        states.clear();
        for row in rows {
            let inspected_by = if row.inspected_by().is_empty() {
                self.session_user.name().to_owned()
            } else {
                row.inspected_by().to_owned()
            };

            states.insert(
                row.work_order().as_str().to_owned(),
                RowSelection {
                    audit_result: render::preselected_result(row.audit_result()),
                    inspected_by,
                    style: row.style().to_owned(),
                    color: row.color().to_owned(),
                    order_qty: row.order_qty(),
                    locked: row.is_submit_locked(),
                },
            );
        }
    }

    fn row_selection(&self, work_order: &str) -> Option<RowSelection> {
        lock(&self.row_states).get(work_order).cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
