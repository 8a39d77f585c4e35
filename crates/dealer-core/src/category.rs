//! # Product Categories
//!
//! Tags a cart line with the board category a dealer must support.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  productType (lowercased)          First match wins                     │
//! │                                                                         │
//! │  contains "windsurf" | "wind"  ──► Windsurf                            │
//! │  contains "sup" | "paddle"     ──► Sup                                 │
//! │  contains "wing" | "foil"      ──► Wingfoil                            │
//! │  anything else                 ──► (none)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching is lossy on purpose: "Windsurf Foil" is a windsurf product,
//! never a wingfoil one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Board category derived from a line item's product type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Windsurf,
    Sup,
    Wingfoil,
}

/// Priority-ordered substring table.
const MATCH_RULES: &[(ProductCategory, &[&str])] = &[
    (ProductCategory::Windsurf, &["windsurf", "wind"]),
    (ProductCategory::Sup, &["sup", "paddle"]),
    (ProductCategory::Wingfoil, &["wing", "foil"]),
];

impl ProductCategory {
    /// All categories, in matching priority order.
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Windsurf,
        ProductCategory::Sup,
        ProductCategory::Wingfoil,
    ];

    /// Categorizes a free-text product type.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::ProductCategory;
    ///
    /// assert_eq!(ProductCategory::from_product_type("SUP Paddle"), Some(ProductCategory::Sup));
    /// assert_eq!(ProductCategory::from_product_type("Gift Card"), None);
    /// ```
    pub fn from_product_type(product_type: &str) -> Option<Self> {
        let lowered = product_type.to_lowercase();
        MATCH_RULES
            .iter()
            .find(|(_, terms)| terms.iter().any(|term| lowered.contains(term)))
            .map(|(category, _)| *category)
    }

    /// Wire name, as used in the assignment blob and error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Windsurf => "windsurf",
            ProductCategory::Sup => "sup",
            ProductCategory::Wingfoil => "wingfoil",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown product category: '{0}'. Valid options: windsurf, sup, wingfoil")]
pub struct UnknownCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windsurf" => Ok(ProductCategory::Windsurf),
            "sup" => Ok(ProductCategory::Sup),
            "wingfoil" => Ok(ProductCategory::Wingfoil),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
