//! # Order Attributes
//!
//! Flat key/value attributes the checkout extension writes next to the
//! assignment blob so fulfilment staff can read the choice on the order
//! without decoding JSON.

use serde::{Deserialize, Serialize};

use crate::assignment::DealerAssignment;
use crate::directory::DealerProfile;

/// One order attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAttribute {
    pub key: String,
    pub value: String,
}

impl OrderAttribute {
    fn new(key: &str, value: impl Into<String>) -> Self {
        OrderAttribute {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Derives the order attributes for an assignment.
///
/// Dealer name and contact come from `profile` when the directory knows the
/// dealer, otherwise the name falls back to the one in the blob and the
/// contact line is omitted.
///
/// ## Example
/// ```rust
/// use dealer_core::attributes::order_attributes;
/// use dealer_core::{DealerAssignment, StaticDirectory};
///
/// let directory = StaticDirectory::builtin();
/// let assignment = DealerAssignment {
///     dealer_id: Some("dealer_2".to_string()),
///     ..Default::default()
/// };
/// let attributes = order_attributes(&assignment, directory.profile("dealer_2"));
/// let keys: Vec<_> = attributes.iter().map(|a| a.key.as_str()).collect();
/// assert_eq!(keys, ["assigned_dealer_id", "assigned_dealer_name", "assigned_dealer_contact"]);
/// ```
pub fn order_attributes(
    assignment: &DealerAssignment,
    profile: Option<&DealerProfile>,
) -> Vec<OrderAttribute> {
    let mut attributes = Vec::new();

    if let Some(dealer_id) = assignment.dealer_id() {
        attributes.push(OrderAttribute::new("assigned_dealer_id", dealer_id));

        let name = profile
            .map(|dealer| dealer.name.as_str())
            .or(assignment.dealer_name.as_deref().filter(|name| !name.is_empty()));
        if let Some(name) = name {
            attributes.push(OrderAttribute::new("assigned_dealer_name", name));
        }
        if let Some(dealer) = profile {
            attributes.push(OrderAttribute::new(
                "assigned_dealer_contact",
                dealer.contact_line(),
            ));
        }
    }

    if let Some(consultation) = &assignment.consultation {
        attributes.push(OrderAttribute::new("consultation_requested", "true"));

        let fields = [
            ("consultation_type", &consultation.kind),
            ("consultation_date", &consultation.preferred_date),
            ("consultation_time", &consultation.preferred_time),
            ("consultation_method", &consultation.contact_method),
        ];
        for (key, value) in fields {
            attributes.push(OrderAttribute::new(key, value.clone().unwrap_or_default()));
        }

        if let Some(notes) = consultation.notes() {
            attributes.push(OrderAttribute::new("consultation_notes", notes));
        }
    }

    if let Some(instructions) = assignment.delivery_instructions() {
        attributes.push(OrderAttribute::new("delivery_instructions", instructions));
    }

    if let Some(preference) = assignment.setup_preference() {
        attributes.push(OrderAttribute::new("equipment_setup_preference", preference));
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Consultation;
    use crate::directory::StaticDirectory;

    fn find<'a>(attributes: &'a [OrderAttribute], key: &str) -> Option<&'a str> {
        attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| attribute.value.as_str())
    }

    #[test]
    fn test_full_assignment() {
        let directory = StaticDirectory::builtin();
        let assignment = DealerAssignment {
            dealer_id: Some("dealer_3".to_string()),
            dealer_name: Some("stale name".to_string()),
            consultation: Some(Consultation {
                kind: Some("skill_assessment".to_string()),
                preferred_date: Some("2026-11-02".to_string()),
                preferred_time: Some("10:00".to_string()),
                contact_method: Some("email".to_string()),
                notes: Some("Beginner".to_string()),
            }),
            delivery_instructions: Some("Ring twice".to_string()),
            setup_preference: Some("dealer_setup".to_string()),
            timestamp: None,
        };

        let attributes = order_attributes(&assignment, directory.profile("dealer_3"));
        assert_eq!(attributes.len(), 11);
        assert_eq!(
            find(&attributes, "assigned_dealer_name"),
            Some("Complete Watersports")
        );
        assert_eq!(
            find(&attributes, "assigned_dealer_contact"),
            Some("+1-415-555-0789 | support@completewatersports.com")
        );
        assert_eq!(find(&attributes, "consultation_requested"), Some("true"));
        assert_eq!(find(&attributes, "consultation_method"), Some("email"));
        assert_eq!(find(&attributes, "consultation_notes"), Some("Beginner"));
        assert_eq!(
            find(&attributes, "equipment_setup_preference"),
            Some("dealer_setup")
        );
    }

    #[test]
    fn test_unknown_dealer_uses_blob_name() {
        let assignment = DealerAssignment {
            dealer_id: Some("dealer_77".to_string()),
            dealer_name: Some("Lake Shop".to_string()),
            ..Default::default()
        };
        let attributes = order_attributes(&assignment, None);
        assert_eq!(find(&attributes, "assigned_dealer_name"), Some("Lake Shop"));
        assert_eq!(find(&attributes, "assigned_dealer_contact"), None);
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let assignment = DealerAssignment {
            delivery_instructions: Some(String::new()),
            setup_preference: Some(String::new()),
            ..Default::default()
        };
        assert!(order_attributes(&assignment, None).is_empty());
    }
}
