use std::collections::HashMap;

use stitchtrack_core::RowId;

use crate::component::TrackingOrder;

/// Returns the parent choices offered to one component row.
///
/// The list holds the names of every other row that currently has a
/// non-empty name, in display order. Duplicate names are carried through
/// unchanged; selecting a parent by a duplicated name is ambiguous until
/// the save-time validation pass rejects the duplicates.
#[must_use]
pub fn parent_choices(order: &TrackingOrder, row: RowId) -> Vec<String> {
    order
        .components()
        .iter()
        .filter(|component| component.identity() != row && !component.component_name().is_empty())
        .map(|component| component.component_name().to_owned())
        .collect()
}

/// Returns the component choices offered to every operation map row.
///
/// Operation entries may reference any component, including the row
/// currently being edited, so nothing is excluded beyond unnamed rows.
#[must_use]
pub fn operation_component_choices(order: &TrackingOrder) -> Vec<String> {
    order
        .components()
        .iter()
        .filter(|component| !component.component_name().is_empty())
        .map(|component| component.component_name().to_owned())
        .collect()
}

/// Name-indexed view of the parent references in a tracking order.
///
/// The ancestor walk is bounded by the component count, so a pre-existing
/// cycle terminates the walk instead of looping.
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    parents: HashMap<String, String>,
    component_count: usize,
}

impl ComponentGraph {
    /// Builds the parent index from the order's current component table.
    #[must_use]
    pub fn from_order(order: &TrackingOrder) -> Self {
        let mut parents = HashMap::new();
        for component in order.components() {
            if let Some(parent) = component.parent_component() {
                parents.insert(
                    component.component_name().to_owned(),
                    parent.to_owned(),
                );
            }
        }

        Self {
            parents,
            component_count: order.components().len(),
        }
    }

    /// Returns the ancestor chain of a component, nearest parent first.
    #[must_use]
    pub fn ancestors(&self, component_name: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = component_name;
        for _ in 0..self.component_count {
            let Some(parent) = self.parents.get(current) else {
                break;
            };
            chain.push(parent.as_str());
            current = parent.as_str();
        }
        chain
    }

    /// Returns whether pointing `component_name` at `proposed_parent`
    /// would make the row its own ancestor.
    ///
    /// Self-reference counts as a cycle; otherwise the proposed parent's
    /// ancestors are walked and the assignment is a cycle when the edited
    /// row appears among them.
    #[must_use]
    pub fn would_create_cycle(&self, component_name: &str, proposed_parent: &str) -> bool {
        if component_name == proposed_parent {
            return true;
        }

        self.ancestors(proposed_parent)
            .iter()
            .any(|ancestor| *ancestor == component_name)
    }

    /// Returns the name of a component that is currently its own
    /// ancestor, if the stored references already contain a cycle.
    #[must_use]
    pub fn cycle_participant(&self) -> Option<&str> {
        self.parents.keys().find_map(|name| {
            self.ancestors(name)
                .iter()
                .any(|ancestor| *ancestor == name)
                .then_some(name.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{ComponentGraph, operation_component_choices, parent_choices};
    use crate::component::TrackingOrder;
    use crate::reference_order::ReferenceOrderType;

    fn order_with(names: &[&str]) -> TrackingOrder {
        let mut order = TrackingOrder::new(ReferenceOrderType::WorkOrder);
        for name in names {
            order.add_component(*name);
        }
        order
    }

    #[test]
    fn parent_choices_exclude_self_and_unnamed_rows() {
        let order = order_with(&["Body", "", "Sleeve"]);
        let body = order.components()[0].identity();
        assert_eq!(parent_choices(&order, body), vec!["Sleeve".to_owned()]);
    }

    #[test]
    fn operation_choices_include_every_named_row() {
        let order = order_with(&["Body", "", "Sleeve"]);
        assert_eq!(
            operation_component_choices(&order),
            vec!["Body".to_owned(), "Sleeve".to_owned()]
        );
    }

    #[test]
    fn renaming_a_row_updates_every_other_choice_set() {
        let mut order = order_with(&["A", "B", "C"]);
        let a = order.components()[0].identity();
        let b = order.components()[1].identity();
        let c = order.components()[2].identity();
        order
            .set_parent(c, Some("A".to_owned()))
            .unwrap_or_else(|_| unreachable!());

        order
            .rename_component(b, "B2")
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(parent_choices(&order, a), vec!["B2", "C"]);
        assert_eq!(parent_choices(&order, c), vec!["A", "B2"]);
        assert_eq!(parent_choices(&order, b), vec!["A", "C"]);
    }

    #[test]
    fn renaming_to_empty_removes_the_row_from_other_choice_sets() {
        let mut order = order_with(&["A", "B"]);
        let a = order.components()[0].identity();
        let b = order.components()[1].identity();

        order
            .rename_component(b, "")
            .unwrap_or_else(|_| unreachable!());

        assert!(parent_choices(&order, a).is_empty());
        assert_eq!(parent_choices(&order, b), vec!["A"]);
    }

    #[test]
    fn recompute_is_idempotent_without_intervening_edits() {
        let order = order_with(&["A", "B", "C"]);
        let a = order.components()[0].identity();
        assert_eq!(parent_choices(&order, a), parent_choices(&order, a));
    }

    #[test]
    fn cycle_walk_rejects_self_reference() {
        let order = order_with(&["Body"]);
        let graph = ComponentGraph::from_order(&order);
        assert!(graph.would_create_cycle("Body", "Body"));
    }

    #[test]
    fn cycle_walk_rejects_ancestor_assignment() {
        let mut order = order_with(&["Body", "Sleeve", "Cuff"]);
        let sleeve = order.components()[1].identity();
        let cuff = order.components()[2].identity();
        order
            .set_parent(sleeve, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        order
            .set_parent(cuff, Some("Sleeve".to_owned()))
            .unwrap_or_else(|_| unreachable!());

        let graph = ComponentGraph::from_order(&order);
        assert!(graph.would_create_cycle("Body", "Cuff"));
        assert!(!graph.would_create_cycle("Cuff", "Body"));
    }

    #[test]
    fn cycle_participant_is_none_for_a_forest() {
        let mut order = order_with(&["Body", "Sleeve"]);
        let sleeve = order.components()[1].identity();
        order
            .set_parent(sleeve, Some("Body".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        assert!(ComponentGraph::from_order(&order).cycle_participant().is_none());
    }

    #[test]
    fn ancestor_walk_terminates_on_existing_cycles() {
        let mut order = order_with(&["A", "B"]);
        let a = order.components()[0].identity();
        let b = order.components()[1].identity();
        order
            .set_parent(a, Some("B".to_owned()))
            .unwrap_or_else(|_| unreachable!());
        order
            .set_parent(b, Some("A".to_owned()))
            .unwrap_or_else(|_| unreachable!());

        let graph = ComponentGraph::from_order(&order);
        assert_eq!(graph.ancestors("A").len(), 2);
        assert!(graph.cycle_participant().is_some());
    }

    proptest! {
        #[test]
        fn parent_choices_match_the_invariant(
            names in prop::collection::vec("[a-d]{0,3}", 1..8),
            selected in 0usize..8,
        ) {
            let mut order = TrackingOrder::new(ReferenceOrderType::Other);
            for name in &names {
                order.add_component(name.clone());
            }
            let index = selected % names.len();
            let row = order.components()[index].identity();

            let expected: Vec<String> = names
                .iter()
                .enumerate()
                .filter(|(position, name)| *position != index && !name.is_empty())
                .map(|(_, name)| name.clone())
                .collect();

            prop_assert_eq!(parent_choices(&order, row), expected);
        }
    }
}
