//! # Error Types
//!
//! Domain-specific error types for dealer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Shopper-facing (blocking checkout)                                    │
//! │  └── Violation        - One failed rule, Display = message shown       │
//! │                                                                         │
//! │  Infrastructure (logged, never shown)                                  │
//! │  ├── ParseError       - Assignment blob could not be decoded           │
//! │  └── DirectoryError   - Reference data lookup failed                   │
//! │                                                                         │
//! │  Flow: ParseError ──► Violation::MalformedAssignment ──► shopper      │
//! │        DirectoryError ──► "dealer unknown" ──► Capability/Geographic   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every `Violation` renders the exact sentence the shopper reads
//! 3. Infrastructure errors carry enough context for the logs

use thiserror::Error;

// =============================================================================
// Violation
// =============================================================================

/// A failed validation rule.
///
/// Every variant blocks checkout; there is no warning severity.
///
/// ## Rule Order
/// ```text
/// parse ──► dealer selected? ──► capability ──► geography ──► consultation
///   │              │                  │             │            │
///   ▼              ▼                  ▼             ▼            ▼
/// Malformed   IncompleteDealer   Capability    Geographic   Incomplete /
/// Assignment  Selection (stop)   Mismatch      Mismatch     NotInFuture /
///                                                           InvalidType
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Metadata present but not decodable.
    #[error("Invalid dealer assignment data. Please select a dealer again.")]
    MalformedAssignment,

    /// Assignment present (or required by policy) without a dealer id.
    #[error("No dealer selected. Please choose an authorized Starboard dealer.")]
    IncompleteDealerSelection,

    /// Dealer cannot serve one or more product categories in the cart.
    ///
    /// `categories` is already joined, in cart order.
    #[error("Selected dealer does not support {categories} products. Please choose a different dealer.")]
    CapabilityMismatch { categories: String },

    /// Dealer does not service the delivery region.
    #[error("Selected dealer does not service deliveries to {region}. Please choose a dealer in your area.")]
    GeographicMismatch { region: String },

    /// Consultation lacks a type, date or time.
    #[error("Incomplete consultation booking information.")]
    IncompleteConsultation,

    /// Consultation date is not strictly after the validation instant.
    #[error("Consultation date must be in the future.")]
    ConsultationNotInFuture,

    /// Consultation type is not one of the four offered sessions.
    #[error("Invalid consultation type selected.")]
    InvalidConsultationType,
}

// =============================================================================
// Parse Error
// =============================================================================

/// The assignment blob was present but could not be decoded.
///
/// The wrapped `serde_json` error goes to the logs only.
#[derive(Debug, Error)]
#[error("Malformed dealer assignment: {source}")]
pub struct ParseError {
    #[from]
    source: serde_json::Error,
}

impl ParseError {
    /// Line of the blob where decoding stopped (1-based).
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Column of the blob where decoding stopped (1-based).
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

// =============================================================================
// Directory Error
// =============================================================================

/// Reference data failures.
///
/// The rule engine degrades these to "dealer unknown"; they never reach the
/// shopper as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The backing directory could not answer.
    #[error("Dealer directory unavailable: {0}")]
    Unavailable(String),

    /// Two profiles share one dealer id.
    #[error("Duplicate dealer id in directory: {0}")]
    DuplicateDealer(String),

    /// A profile is structurally unusable.
    #[error("Invalid dealer record {dealer_id}: {reason}")]
    InvalidRecord { dealer_id: String, reason: String },
}

/// Convenience type alias for reference data lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let err = Violation::CapabilityMismatch {
            categories: "windsurf, sup".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Selected dealer does not support windsurf, sup products. Please choose a different dealer."
        );

        let err = Violation::GeographicMismatch {
            region: "TX".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Selected dealer does not service deliveries to TX. Please choose a dealer in your area."
        );

        assert_eq!(
            Violation::MalformedAssignment.to_string(),
            "Invalid dealer assignment data. Please select a dealer again."
        );
    }

    #[test]
    fn test_parse_error_position() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ParseError::from(source);
        assert_eq!(err.line(), 1);
        assert!(err.column() > 0);
        assert!(err.to_string().starts_with("Malformed dealer assignment"));
    }

    #[test]
    fn test_directory_error_messages() {
        let err = DirectoryError::InvalidRecord {
            dealer_id: "dealer_9".to_string(),
            reason: "empty id".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid dealer record dealer_9: empty id");
    }
}
