use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stitchtrack_core::{AppError, AppResult, NonEmptyString, RowId};

use crate::hierarchy::ComponentGraph;
use crate::reference_order::ReferenceOrderType;

/// A named node in a per-order hierarchy representing a physical sub-part.
///
/// The name is user-editable and may be empty while the operator is still
/// typing; rows without a name are simply excluded from every choice list
/// until one is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingComponent {
    identity: RowId,
    component_name: String,
    parent_component: Option<String>,
    is_main: bool,
}

impl TrackingComponent {
    fn new(component_name: impl Into<String>) -> Self {
        Self {
            identity: RowId::new(),
            component_name: component_name.into(),
            parent_component: None,
            is_main: false,
        }
    }

    /// Returns the stable row key.
    #[must_use]
    pub fn identity(&self) -> RowId {
        self.identity
    }

    /// Returns the current component name; empty while unset.
    #[must_use]
    pub fn component_name(&self) -> &str {
        self.component_name.as_str()
    }

    /// Returns the referenced parent component name, if any.
    #[must_use]
    pub fn parent_component(&self) -> Option<&str> {
        self.parent_component.as_deref()
    }

    /// Returns whether this row is marked as the main component.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.is_main
    }
}

/// A row binding a manufacturing operation to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMapEntry {
    identity: RowId,
    operation: NonEmptyString,
    sequence_no: u32,
    component: String,
}

impl OperationMapEntry {
    fn new(
        operation: impl Into<String>,
        sequence_no: u32,
        component: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            identity: RowId::new(),
            operation: NonEmptyString::new(operation)?,
            sequence_no,
            component: component.into(),
        })
    }

    /// Returns the stable row key.
    #[must_use]
    pub fn identity(&self) -> RowId {
        self.identity
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &NonEmptyString {
        &self.operation
    }

    /// Returns the position of the operation in the production sequence.
    #[must_use]
    pub fn sequence_no(&self) -> u32 {
        self.sequence_no
    }

    /// Returns the referenced component name.
    #[must_use]
    pub fn component(&self) -> &str {
        self.component.as_str()
    }
}

/// In-memory aggregate for a tracking order's editable child tables.
///
/// Row order is significant for display only; the parent/child hierarchy is
/// carried entirely by the `parent_component` references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingOrder {
    reference_order_type: ReferenceOrderType,
    components: Vec<TrackingComponent>,
    operation_map: Vec<OperationMapEntry>,
}

impl TrackingOrder {
    /// Creates an empty tracking order.
    #[must_use]
    pub fn new(reference_order_type: ReferenceOrderType) -> Self {
        Self {
            reference_order_type,
            components: Vec::new(),
            operation_map: Vec::new(),
        }
    }

    /// Returns the reference order type driving the number placeholder.
    #[must_use]
    pub fn reference_order_type(&self) -> ReferenceOrderType {
        self.reference_order_type
    }

    /// Changes the reference order type.
    pub fn set_reference_order_type(&mut self, reference_order_type: ReferenceOrderType) {
        self.reference_order_type = reference_order_type;
    }

    /// Returns all component rows in display order.
    #[must_use]
    pub fn components(&self) -> &[TrackingComponent] {
        &self.components
    }

    /// Returns all operation map rows in display order.
    #[must_use]
    pub fn operation_map(&self) -> &[OperationMapEntry] {
        &self.operation_map
    }

    /// Looks up a component row by identity.
    #[must_use]
    pub fn component(&self, row: RowId) -> Option<&TrackingComponent> {
        self.components
            .iter()
            .find(|component| component.identity() == row)
    }

    /// Returns whether a component row with the given identity exists.
    #[must_use]
    pub fn contains_component(&self, row: RowId) -> bool {
        self.component(row).is_some()
    }

    /// Appends a component row and returns its generated identity.
    pub fn add_component(&mut self, component_name: impl Into<String>) -> RowId {
        let component = TrackingComponent::new(component_name);
        let identity = component.identity();
        self.components.push(component);
        identity
    }

    /// Renames a component row.
    pub fn rename_component(
        &mut self,
        row: RowId,
        component_name: impl Into<String>,
    ) -> AppResult<()> {
        let component = self.component_mut(row)?;
        component.component_name = component_name.into();
        Ok(())
    }

    /// Removes a component row.
    pub fn remove_component(&mut self, row: RowId) -> AppResult<()> {
        let position = self
            .components
            .iter()
            .position(|component| component.identity() == row)
            .ok_or_else(|| AppError::NotFound(format!("component row '{row}' does not exist")))?;
        self.components.remove(position);
        Ok(())
    }

    /// Sets or clears a component row's parent reference.
    ///
    /// This only records the reference; self-reference and cycle rejection
    /// happen in the hierarchy engine before assignment and again in
    /// [`TrackingOrder::validate`] before persistence.
    pub fn set_parent(&mut self, row: RowId, parent_component: Option<String>) -> AppResult<()> {
        let component = self.component_mut(row)?;
        component.parent_component = parent_component.filter(|name| !name.is_empty());
        Ok(())
    }

    /// Marks or unmarks a component row as the main component.
    pub fn set_main(&mut self, row: RowId, is_main: bool) -> AppResult<()> {
        let component = self.component_mut(row)?;
        component.is_main = is_main;
        Ok(())
    }

    /// Appends an operation map row and returns its generated identity.
    pub fn add_operation(
        &mut self,
        operation: impl Into<String>,
        sequence_no: u32,
        component: impl Into<String>,
    ) -> AppResult<RowId> {
        let entry = OperationMapEntry::new(operation, sequence_no, component)?;
        let identity = entry.identity();
        self.operation_map.push(entry);
        Ok(identity)
    }

    /// Points an operation map row at a different component.
    pub fn set_operation_component(
        &mut self,
        row: RowId,
        component: impl Into<String>,
    ) -> AppResult<()> {
        let entry = self
            .operation_map
            .iter_mut()
            .find(|entry| entry.identity() == row)
            .ok_or_else(|| {
                AppError::NotFound(format!("operation map row '{row}' does not exist"))
            })?;
        entry.component = component.into();
        Ok(())
    }

    /// Validates the component table before persistence.
    ///
    /// Every row needs a unique, non-empty name; no row may be its own
    /// parent or ancestor; at most one row is the main component and it
    /// must be a leaf.
    pub fn validate(&self) -> AppResult<()> {
        let mut component_names: HashSet<&str> = HashSet::new();
        let mut parent_names: HashSet<&str> = HashSet::new();
        let mut main_component: Option<&str> = None;

        for (index, component) in self.components.iter().enumerate() {
            let row_number = index + 1;
            let name = component.component_name().trim();
            if name.is_empty() {
                return Err(AppError::Validation(format!(
                    "component name is required in row {row_number} of tracking components"
                )));
            }

            if !component_names.insert(name) {
                return Err(AppError::Validation(format!(
                    "duplicate component name '{name}' in tracking components at row {row_number}"
                )));
            }

            if let Some(parent) = component.parent_component() {
                if parent == name {
                    return Err(AppError::Validation(format!(
                        "component '{name}' cannot be its own parent (row {row_number})"
                    )));
                }
                parent_names.insert(parent);
            }

            if component.is_main() {
                if let Some(existing) = main_component {
                    return Err(AppError::Validation(format!(
                        "multiple main components found: '{existing}' and '{name}'; only one is allowed"
                    )));
                }
                main_component = Some(name);
            }
        }

        if let Some(main) = main_component
            && parent_names.contains(main)
        {
            return Err(AppError::Validation(format!(
                "the main component '{main}' cannot be a parent of another component; it must be a leaf"
            )));
        }

        if let Some(name) = ComponentGraph::from_order(self).cycle_participant() {
            return Err(AppError::Validation(format!(
                "component '{name}' is its own ancestor in the parent hierarchy"
            )));
        }

        Ok(())
    }

    fn component_mut(&mut self, row: RowId) -> AppResult<&mut TrackingComponent> {
        self.components
            .iter_mut()
            .find(|component| component.identity() == row)
            .ok_or_else(|| AppError::NotFound(format!("component row '{row}' does not exist")))
    }
}

#[cfg(test)]
mod tests {
    use stitchtrack_core::AppError;

    use super::TrackingOrder;
    use crate::reference_order::ReferenceOrderType;

    fn order_with(names: &[&str]) -> TrackingOrder {
        let mut order = TrackingOrder::new(ReferenceOrderType::CutOrder);
        for name in names {
            order.add_component(*name);
        }
        order
    }

    #[test]
    fn validate_requires_component_names() {
        let order = order_with(&["Body", ""]);
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let order = order_with(&["Body", "Body"]);
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_self_parent() {
        let mut order = order_with(&["Body"]);
        let row = order.components()[0].identity();
        order
            .set_parent(row, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_multiple_main_components() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let first = order.components()[0].identity();
        let second = order.components()[1].identity();
        order.set_main(first, true).unwrap_or_else(|_| unreachable!());
        order
            .set_main(second, true)
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_requires_main_component_to_be_leaf() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let body = order.components()[0].identity();
        let sleeve = order.components()[1].identity();
        order.set_main(body, true).unwrap_or_else(|_| unreachable!());
        order
            .set_parent(sleeve, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_parent_cycles() {
        let mut order = order_with(&["Body", "Sleeve", "Cuff"]);
        let body = order.components()[0].identity();
        let sleeve = order.components()[1].identity();
        let cuff = order.components()[2].identity();
        order
            .set_parent(body, Some("Cuff".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        order
            .set_parent(sleeve, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        order
            .set_parent(cuff, Some("Sleeve".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(order.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_accepts_a_well_formed_forest() {
        let mut order = order_with(&["Body", "Sleeve", "Cuff"]);
        let sleeve = order.components()[1].identity();
        let cuff = order.components()[2].identity();
        order
            .set_parent(sleeve, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        order
            .set_parent(cuff, Some("Sleeve".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        assert!(order.validate().is_ok());
    }

    #[test]
    fn remove_component_forgets_the_row() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let body = order.components()[0].identity();
        order.remove_component(body).unwrap_or_else(|_| unreachable!());
        assert!(!order.contains_component(body));
        assert!(matches!(
            order.remove_component(body),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn operation_rows_can_be_repointed_at_components() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let row = order
            .add_operation("Sewing QC", 1, "Body")
            .unwrap_or_else(|_| unreachable!());
        order
            .set_operation_component(row, "Sleeve")
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(order.operation_map()[0].operation().as_str(), "Sewing QC");
        assert_eq!(order.operation_map()[0].sequence_no(), 1);
        assert_eq!(order.operation_map()[0].component(), "Sleeve");
        assert!(order.add_operation("", 2, "Body").is_err());
    }

    #[test]
    fn set_parent_treats_empty_as_cleared() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let sleeve = order.components()[1].identity();
        order
            .set_parent(sleeve, Some(String::new()))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(order.components()[1].parent_component(), None);
    }
}
