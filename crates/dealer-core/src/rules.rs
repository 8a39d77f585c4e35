//! # Rule Engine
//!
//! Decides whether a dealer assignment may proceed to payment.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RuleEngine::violations                            │
//! │                                                                         │
//! │  1. Presence        no assignment ─┬─ Optional ──► []                  │
//! │                                    └─ Required ──► [NoDealer]          │
//! │  2. Dealer selected no dealerId ─────────────────► [NoDealer]  STOP    │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  3. Capability      cart categories ⊄ supported ─► CapabilityMismatch  │
//! │  4. Geography       region ∉ service regions ────► GeographicMismatch  │
//! │                     (skipped without a region)                         │
//! │  5. Consultation    a. incomplete ───────────────► Incomplete  (gates) │
//! │                     b. date not in future ───────► NotInFuture         │
//! │                     c. unknown type ─────────────► InvalidType         │
//! │                                                                         │
//! │  3, 4 and 5 always all run; output order is 3, 4, 5a, 5b, 5c.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no state between calls. The validation instant is a
//! parameter, so identical inputs always yield identical output.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::assignment::{Consultation, DealerAssignment};
use crate::directory::{DealerCapabilityRecord, ReferenceDataProvider};
use crate::error::Violation;
use crate::types::{AssignmentPolicy, CartSnapshot, ValidationError};
use crate::CART_TARGET;

/// Runs the ordered dealer assignment checks.
pub struct RuleEngine<'a, P: ReferenceDataProvider + ?Sized> {
    provider: &'a P,
    policy: AssignmentPolicy,
    target: &'a str,
}

impl<'a, P: ReferenceDataProvider + ?Sized> RuleEngine<'a, P> {
    /// Creates an engine with the optional-assignment policy and the cart
    /// as error target.
    pub fn new(provider: &'a P) -> Self {
        RuleEngine {
            provider,
            policy: AssignmentPolicy::default(),
            target: CART_TARGET,
        }
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_target(mut self, target: &'a str) -> Self {
        self.target = target;
        self
    }

    /// Runs all checks and renders the violations for the shopper.
    pub fn validate(
        &self,
        cart: &CartSnapshot,
        assignment: Option<&DealerAssignment>,
        now: DateTime<Utc>,
    ) -> Vec<ValidationError> {
        self.violations(cart, assignment, now)
            .iter()
            .map(|violation| ValidationError::from_violation(violation, self.target))
            .collect()
    }

    /// Runs all checks and returns the raw violations, in check order.
    pub fn violations(
        &self,
        cart: &CartSnapshot,
        assignment: Option<&DealerAssignment>,
        now: DateTime<Utc>,
    ) -> Vec<Violation> {
        let Some(assignment) = assignment else {
            debug!(policy = %self.policy, "No dealer assignment on cart");
            return if self.policy.is_required() {
                vec![Violation::IncompleteDealerSelection]
            } else {
                Vec::new()
            };
        };

        let Some(dealer_id) = assignment.dealer_id() else {
            debug!("Dealer assignment without dealer id");
            return vec![Violation::IncompleteDealerSelection];
        };

        let record = self.capabilities(dealer_id);
        let mut violations = Vec::new();

        if let Some(violation) = check_capability(cart, &record) {
            violations.push(violation);
        }

        if let Some(violation) = check_region(cart, &record) {
            violations.push(violation);
        }

        if let Some(consultation) = &assignment.consultation {
            violations.extend(check_consultation(consultation, now));
        }

        debug!(
            dealer_id,
            violations = violations.len(),
            "Dealer assignment checked"
        );
        violations
    }

    /// One lookup per call; misses and failures both mean "knows nothing".
    fn capabilities(&self, dealer_id: &str) -> DealerCapabilityRecord {
        match self.provider.lookup(dealer_id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(dealer_id, "Dealer not found in directory");
                DealerCapabilityRecord::default()
            }
            Err(error) => {
                warn!(dealer_id, %error, "Dealer lookup failed, treating dealer as unknown");
                DealerCapabilityRecord::default()
            }
        }
    }
}

// =============================================================================
// Individual Checks
// =============================================================================

/// Categories in the cart the dealer cannot serve, joined in cart order.
fn check_capability(cart: &CartSnapshot, record: &DealerCapabilityRecord) -> Option<Violation> {
    let unsupported: Vec<&str> = cart
        .categories()
        .into_iter()
        .filter(|category| !record.supports(*category))
        .map(|category| category.as_str())
        .collect();

    if unsupported.is_empty() {
        return None;
    }

    Some(Violation::CapabilityMismatch {
        categories: unsupported.join(", "),
    })
}

fn check_region(cart: &CartSnapshot, record: &DealerCapabilityRecord) -> Option<Violation> {
    let region = cart.delivery_region.as_ref()?;

    if record.services(region) {
        return None;
    }

    Some(Violation::GeographicMismatch {
        region: region.to_string(),
    })
}

/// Completeness gates the date and type checks; those two are independent.
fn check_consultation(consultation: &Consultation, now: DateTime<Utc>) -> Vec<Violation> {
    if !consultation.is_complete() {
        return vec![Violation::IncompleteConsultation];
    }

    let mut violations = Vec::new();

    // Unparseable dates can never be shown to be in the future.
    let in_future = consultation
        .scheduled_instant()
        .is_some_and(|starts| starts > now);
    if !in_future {
        violations.push(Violation::ConsultationNotInFuture);
    }

    if consultation.consultation_type().is_none() {
        violations.push(Violation::InvalidConsultationType);
    }

    violations
}

// =============================================================================
// Unit Tests
// =============================================================================
