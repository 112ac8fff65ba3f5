use serde::{Deserialize, Serialize};

/// Order types a tracking order can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceOrderType {
    /// A customer sales order.
    #[serde(rename = "Sales Order")]
    SalesOrder,
    /// A manufacturing work order.
    #[serde(rename = "Work Order")]
    WorkOrder,
    /// A cutting-room cut order.
    #[serde(rename = "Cut Order")]
    CutOrder,
    /// Any other or not-yet-selected reference.
    #[serde(rename = "")]
    Other,
}

impl ReferenceOrderType {
    /// Returns the display label for the order type; empty for `Other`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SalesOrder => "Sales Order",
            Self::WorkOrder => "Work Order",
            Self::CutOrder => "Cut Order",
            Self::Other => "",
        }
    }

    /// Parses a display label; anything unrecognized maps to `Other`.
    #[must_use]
    pub fn from_label(value: &str) -> Self {
        match value {
            "Sales Order" => Self::SalesOrder,
            "Work Order" => Self::WorkOrder,
            "Cut Order" => Self::CutOrder,
            _ => Self::Other,
        }
    }
}

/// Returns the placeholder text for the reference number input.
#[must_use]
pub fn reference_number_placeholder(reference_order_type: ReferenceOrderType) -> &'static str {
    match reference_order_type {
        ReferenceOrderType::SalesOrder => "Enter Sales Order Number (SO-XXXXX)",
        ReferenceOrderType::WorkOrder => "Enter Work Order Number (WO-XXXXX)",
        ReferenceOrderType::CutOrder => "Enter Cut Order Number (CO-XXXXX)",
        ReferenceOrderType::Other => "Enter Reference Order Number",
    }
}

#[cfg(test)]
mod tests {
    use super::{ReferenceOrderType, reference_number_placeholder};

    #[test]
    fn every_known_type_gets_a_specific_placeholder() {
        assert_eq!(
            reference_number_placeholder(ReferenceOrderType::SalesOrder),
            "Enter Sales Order Number (SO-XXXXX)"
        );
        assert_eq!(
            reference_number_placeholder(ReferenceOrderType::WorkOrder),
            "Enter Work Order Number (WO-XXXXX)"
        );
        assert_eq!(
            reference_number_placeholder(ReferenceOrderType::CutOrder),
            "Enter Cut Order Number (CO-XXXXX)"
        );
    }

    #[test]
    fn unknown_labels_fall_back_to_the_generic_placeholder() {
        let parsed = ReferenceOrderType::from_label("Purchase Order");
        assert_eq!(parsed, ReferenceOrderType::Other);
        assert_eq!(
            reference_number_placeholder(parsed),
            "Enter Reference Order Number"
        );
    }
}
