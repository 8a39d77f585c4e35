//! # Domain Types
//!
//! The read-only view of a cart the rules run against, and the records they
//! emit.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartSnapshot   │   │    LineItem     │   │   RegionCode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  lines          │──►│  product_type   │   │  "CA", "TX"     │       │
//! │  │  delivery_region│   │  category       │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ ValidationError │   │AssignmentPolicy │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  message        │   │  Optional       │                             │
//! │  │  target         │   │  Required       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::ProductCategory;
use crate::error::Violation;

// =============================================================================
// Region Code
// =============================================================================

/// A state/province code a dealer delivers into.
///
/// Compared verbatim; the host platform already normalizes codes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl Into<String>) -> Self {
        RegionCode(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(code: &str) -> Self {
        RegionCode::new(code)
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// A cart line, reduced to what the rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Free-text product type as configured in the catalog.
    pub product_type: String,

    /// Category derived from `product_type` at construction.
    pub category: Option<ProductCategory>,
}

impl LineItem {
    /// Builds a line and derives its category.
    pub fn from_product_type(product_type: impl Into<String>) -> Self {
        let product_type = product_type.into();
        let category = ProductCategory::from_product_type(&product_type);
        LineItem {
            product_type,
            category,
        }
    }
}

/// Immutable view of the cart supplied by the host at validation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<LineItem>,

    /// Region of the first delivery group, when the shopper entered one.
    pub delivery_region: Option<RegionCode>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<LineItem>, delivery_region: Option<RegionCode>) -> Self {
        CartSnapshot {
            lines,
            delivery_region,
        }
    }

    /// Distinct categories in the order lines first mention them.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::types::{CartSnapshot, LineItem};
    /// use dealer_core::ProductCategory;
    ///
    /// let cart = CartSnapshot::new(
    ///     vec![
    ///         LineItem::from_product_type("SUP Board"),
    ///         LineItem::from_product_type("Windsurf Sail"),
    ///         LineItem::from_product_type("SUP Paddle"),
    ///     ],
    ///     None,
    /// );
    /// assert_eq!(cart.categories(), vec![ProductCategory::Sup, ProductCategory::Windsurf]);
    /// ```
    pub fn categories(&self) -> Vec<ProductCategory> {
        let mut seen = Vec::with_capacity(ProductCategory::ALL.len());
        for category in self.lines.iter().filter_map(|line| line.category) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A blocking message surfaced to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    pub target: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, target: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
            target: target.into(),
        }
    }

    /// Renders a violation against `target`.
    pub fn from_violation(violation: &Violation, target: &str) -> Self {
        ValidationError::new(violation.to_string(), target)
    }
}

// =============================================================================
// Assignment Policy
// =============================================================================

/// Whether checkout may proceed without any dealer assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// No assignment attribute → proceed.
    #[default]
    Optional,

    /// No assignment attribute → "No dealer selected".
    #[serde(alias = "mandatory")]
    Required,
}

impl AssignmentPolicy {
    pub fn is_required(&self) -> bool {
        matches!(self, AssignmentPolicy::Required)
    }
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentPolicy::Optional => write!(f, "optional"),
            AssignmentPolicy::Required => write!(f, "required"),
        }
    }
}

/// Unknown policy names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown assignment policy: '{0}'. Valid options: optional, required")]
pub struct UnknownPolicy(pub String);

impl FromStr for AssignmentPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optional" => Ok(AssignmentPolicy::Optional),
            "required" | "mandatory" => Ok(AssignmentPolicy::Required),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_aliases_agree() {
        for name in ["optional", "required", "mandatory"] {
            let parsed: AssignmentPolicy = name.parse().unwrap();
            let decoded: AssignmentPolicy =
                serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap();
            assert_eq!(parsed, decoded, "{name}");
        }
        assert!("sometimes".parse::<AssignmentPolicy>().is_err());
    }

    #[test]
    fn test_line_item_category() {
        let line = LineItem::from_product_type("Windsurf Board");
        assert_eq!(line.category, Some(ProductCategory::Windsurf));

        let line = LineItem::from_product_type("Sunscreen");
        assert_eq!(line.category, None);
    }

    #[test]
    fn test_categories_skip_uncategorized_lines() {
        let cart = CartSnapshot::new(
            vec![
                LineItem::from_product_type("Leash"),
                LineItem::from_product_type("Wing"),
            ],
            None,
        );
        assert_eq!(cart.categories(), vec![ProductCategory::Wingfoil]);
        assert!(CartSnapshot::default().categories().is_empty());
    }

    #[test]
    fn test_validation_error_from_violation() {
        let err = ValidationError::from_violation(&Violation::InvalidConsultationType, "cart");
        assert_eq!(err.message, "Invalid consultation type selected.");
        assert_eq!(err.target, "cart");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["target"], "cart");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("optional".parse(), Ok(AssignmentPolicy::Optional));
        assert_eq!("Required".parse(), Ok(AssignmentPolicy::Required));
        assert_eq!("mandatory".parse(), Ok(AssignmentPolicy::Required));
        assert!("sometimes".parse::<AssignmentPolicy>().is_err());
        assert_eq!(AssignmentPolicy::default(), AssignmentPolicy::Optional);
    }

    #[test]
    fn test_region_display() {
        assert_eq!(RegionCode::from("NV").to_string(), "NV");
    }
}
