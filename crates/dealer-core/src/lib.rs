//! # dealer-core: Pure Rules for Dealer Assignment
//!
//! This crate decides whether a cart's dealer assignment may proceed to
//! payment. Every function is pure: the clock, the cart and the dealer
//! reference data are all handed in by the caller.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dealer Assignment Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Checkout UI Extension (TypeScript)                 │   │
//! │  │   Dealer list ──► Consultation form ──► dealer_assignment_data  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ cart attribute (JSON)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              dealer-validation (function binary)                │   │
//! │  │       RunInput ──► CartSnapshot ──► FunctionRunResult           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐ │   │
//! │  │   │ assignment │  │  category  │  │ directory  │  │  rules   │ │   │
//! │  │   │  parser    │  │  tagging   │  │ lookups    │  │  engine  │ │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘  └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`assignment`] - The cart attribute blob and its parser
//! - [`category`] - Product type → [`ProductCategory`] tagging
//! - [`directory`] - Dealer reference data and the lookup trait
//! - [`rules`] - The ordered validation checks
//! - [`attributes`] - Flat order attributes derived from an assignment
//! - [`error`] - Violations and infrastructure errors
//! - [`types`] - Cart snapshot, regions, emitted errors, policy
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use dealer_core::assignment::parse_assignment;
//! use dealer_core::directory::StaticDirectory;
//! use dealer_core::rules::RuleEngine;
//! use dealer_core::types::{CartSnapshot, LineItem, RegionCode};
//!
//! let directory = StaticDirectory::builtin();
//! let assignment = parse_assignment(Some(r#"{"dealerId":"dealer_2"}"#)).unwrap();
//! let cart = CartSnapshot::new(
//!     vec![LineItem::from_product_type("Windsurf Board")],
//!     Some(RegionCode::new("CA")),
//! );
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
//!
//! let errors = RuleEngine::new(&directory).validate(&cart, assignment.as_ref(), now);
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].message.contains("windsurf"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assignment;
pub mod attributes;
pub mod category;
pub mod directory;
pub mod error;
pub mod rules;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assignment::{parse_assignment, Consultation, DealerAssignment};
pub use category::ProductCategory;
pub use directory::{DealerCapabilityRecord, ReferenceDataProvider, StaticDirectory};
pub use error::{DirectoryError, ParseError, Violation};
pub use rules::RuleEngine;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cart attribute key holding the JSON-encoded [`DealerAssignment`].
pub const ASSIGNMENT_ATTRIBUTE_KEY: &str = "dealer_assignment_data";

/// Locator attached to every emitted error unless configured otherwise.
///
/// All checks concern the cart as a whole, never a single line.
pub const CART_TARGET: &str = "cart";
