use std::sync::Arc;

use stitchtrack_core::{AppError, AppResult, RowId};
use stitchtrack_domain::{
    ComponentGraph, TrackingOrder, operation_component_choices, parent_choices,
    reference_number_placeholder,
};

use crate::view_ports::{GridPane, GridPresenter};

/// Keeps every row's parent choices consistent with the component list.
///
/// All recomputation is synchronous: by the time a call returns, both
/// grids have been handed option lists derived from the list state at
/// call time, then refreshed.
#[derive(Clone)]
pub struct HierarchySyncEngine {
    presenter: Arc<dyn GridPresenter>,
}

impl HierarchySyncEngine {
    /// Creates an engine pushing into the given presentation surface.
    #[must_use]
    pub fn new(presenter: Arc<dyn GridPresenter>) -> Self {
        Self { presenter }
    }

    /// Recomputes and pushes every choice list after a structural change
    /// to the component list (add, rename, or remove).
    ///
    /// Each component row gets its own option list, the empty no-parent
    /// choice followed by every other named row. Operation map rows share
    /// one list holding every named row, including the one just edited.
    pub fn on_component_list_changed(&self, order: &TrackingOrder) {
        for component in order.components() {
            let mut options = Vec::with_capacity(order.components().len());
            options.push(String::new());
            options.extend(parent_choices(order, component.identity()));
            self.presenter
                .set_parent_component_options(component.identity(), &options);
        }

        let operation_options = operation_component_choices(order);
        self.presenter
            .set_operation_component_options(&operation_options);

        self.presenter.refresh(GridPane::Components);
        self.presenter.refresh(GridPane::OperationMap);
    }

    /// Assigns a parent to a component row after rejecting selections
    /// that would make the row its own ancestor.
    ///
    /// The proposed parent must be among the row's current choices; an
    /// empty or absent parent clears the reference.
    pub fn assign_parent(
        &self,
        order: &mut TrackingOrder,
        row: RowId,
        proposed_parent: Option<String>,
    ) -> AppResult<()> {
        let component = order
            .component(row)
            .ok_or_else(|| AppError::NotFound(format!("component row '{row}' does not exist")))?;

        if let Some(parent) = proposed_parent.as_deref().filter(|name| !name.is_empty()) {
            let component_name = component.component_name().to_owned();

            if !parent_choices(order, row).iter().any(|choice| choice == parent) {
                return Err(AppError::Validation(format!(
                    "'{parent}' is not a selectable parent for component '{component_name}'"
                )));
            }

            let graph = ComponentGraph::from_order(order);
            if graph.would_create_cycle(&component_name, parent) {
                return Err(AppError::Validation(format!(
                    "selecting parent '{parent}' would make component '{component_name}' its own ancestor"
                )));
            }
        }

        order.set_parent(row, proposed_parent)?;
        self.presenter.refresh(GridPane::Components);
        Ok(())
    }

    /// Pushes the reference number placeholder matching the order's
    /// current reference order type.
    pub fn apply_reference_placeholder(&self, order: &TrackingOrder) {
        self.presenter.set_reference_number_placeholder(
            reference_number_placeholder(order.reference_order_type()),
        );
    }
}
