use stitchtrack_core::RowId;
use stitchtrack_domain::AuditResultBadge;

/// Severity of a transient dashboard notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Positive confirmation.
    Success,
    /// Recoverable problem the operator must act on.
    Warning,
    /// Failed operation.
    Error,
}

/// A transient message shown next to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity of the message.
    pub level: NoticeLevel,
    /// Text shown to the operator.
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// One entry of a rendered inspector dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorOption {
    /// Stable user name submitted with the audit.
    pub name: String,
    /// Display name shown in the dropdown.
    pub full_name: String,
    /// Whether this entry is pre-selected.
    pub selected: bool,
}

/// View model for one dashboard row.
///
/// Built once per fetched row; blank display fields are already replaced
/// by dashes so the view renders it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Work order name, also the link target.
    pub work_order: String,
    /// Style display text.
    pub style: String,
    /// Colour display text.
    pub color: String,
    /// Ordered quantity display text.
    pub order_qty: String,
    /// Received quantity display text.
    pub received_qty: String,
    /// Vendor display text.
    pub vendor: String,
    /// Audit date display text.
    pub audit_date: String,
    /// Badge classification for the result cell.
    pub result_badge: AuditResultBadge,
    /// Whether the row carries the red failure highlight.
    pub fail_marker: bool,
    /// Whether the submit control is enabled.
    pub submit_enabled: bool,
    /// Result value pre-selected in the status dropdown.
    pub selected_result: String,
    /// Inspector dropdown entries with the default pre-selected.
    pub inspector_options: Vec<InspectorOption>,
}

/// Grids refreshed after the hierarchy engine recomputes choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPane {
    /// The tracking component child table.
    Components,
    /// The operation map child table.
    OperationMap,
}

/// Presentation surface for the tracking order form grids.
///
/// Implementations only record or apply what they are handed; all choice
/// computation stays in the engine so a refresh can never observe a
/// partially updated option list.
pub trait GridPresenter: Send + Sync {
    /// Replaces one row's parent choice list.
    fn set_parent_component_options(&self, row: RowId, options: &[String]);

    /// Replaces the component choice list shared by operation map rows.
    fn set_operation_component_options(&self, options: &[String]);

    /// Applies the reference number input placeholder.
    fn set_reference_number_placeholder(&self, placeholder: &str);

    /// Re-renders a grid after its options changed.
    fn refresh(&self, pane: GridPane);
}

/// Presentation surface for the audit dashboard list.
pub trait DashboardView: Send + Sync {
    /// Replaces the list with the loading placeholder.
    fn show_loading(&self);

    /// Replaces the list with rendered rows.
    fn show_rows(&self, rows: &[RenderedRow]);

    /// Replaces the list with the no-results placeholder.
    fn show_empty(&self);

    /// Replaces the list with the failure placeholder.
    fn show_error(&self, message: &str);

    /// Shows a transient notice without touching the list.
    fn notify(&self, notice: Notice);
}
