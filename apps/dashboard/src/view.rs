use stitchtrack_application::{DashboardView, Notice, NoticeLevel, RenderedRow};
use tracing::{error, info, warn};

/// Dashboard view rendering list states as structured log lines.
pub struct TracingDashboardView;

impl TracingDashboardView {
    /// Creates the log-backed view.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingDashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for TracingDashboardView {
    fn show_loading(&self) {
        info!("loading work orders");
    }

    fn show_rows(&self, rows: &[RenderedRow]) {
        for row in rows {
            info!(
                work_order = %row.work_order,
                style = %row.style,
                color = %row.color,
                order_qty = %row.order_qty,
                audit_date = %row.audit_date,
                result = ?row.result_badge,
                fail_marker = row.fail_marker,
                submit_enabled = row.submit_enabled,
                "work order awaiting audit"
            );
        }
    }

    fn show_empty(&self) {
        info!("no work orders found");
    }

    fn show_error(&self, message: &str) {
        error!(%message, "work order list failed to load");
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "dashboard notice"),
            NoticeLevel::Warning => warn!(message = %notice.message, "dashboard notice"),
            NoticeLevel::Error => error!(message = %notice.message, "dashboard notice"),
        }
    }
}
