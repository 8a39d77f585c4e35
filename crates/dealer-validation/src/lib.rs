//! # dealer-validation: Checkout Validation Function
//!
//! Blocks checkout when the cart's dealer assignment is inconsistent.
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             run()                                       │
//! │                                                                         │
//! │  cart.attribute("dealer_assignment_data")                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_assignment ──── Err ──► [MalformedAssignment] ──┐               │
//! │       │ Ok                      (decode error logged)   │               │
//! │       ▼                                                 │               │
//! │  RuleEngine::validate(snapshot, assignment, now) ───────┤               │
//! │                                                         ▼               │
//! │                                                       emit ──► result  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `run` never fails: every problem the shopper can fix becomes a message,
//! and nothing else can go wrong once the input is decoded.
//!
//! ## Example
//! ```rust
//! use chrono::Utc;
//! use dealer_core::StaticDirectory;
//! use dealer_validation::{run, RunInput, ValidationConfig};
//!
//! let input: RunInput = serde_json::from_str(r#"{
//!     "cart": {
//!         "attributes": [{ "key": "dealer_assignment_data", "value": "{not json" }],
//!         "lines": []
//!     }
//! }"#).unwrap();
//!
//! let result = run(&input, &StaticDirectory::builtin(), &ValidationConfig::default(), Utc::now());
//! assert!(result.is_blocking());
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod input;
pub mod output;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use dealer_core::{
    parse_assignment, ReferenceDataProvider, RuleEngine, ValidationError, Violation,
    ASSIGNMENT_ATTRIBUTE_KEY,
};

pub use config::ValidationConfig;
pub use error::{FunctionError, FunctionResult};
pub use input::RunInput;
pub use output::{emit, FunctionRunResult, Operation};

/// Validates one cart against the dealer assignment rules.
pub fn run<P: ReferenceDataProvider + ?Sized>(
    input: &RunInput,
    directory: &P,
    config: &ValidationConfig,
    now: DateTime<Utc>,
) -> FunctionRunResult {
    let raw = input.cart.attribute(ASSIGNMENT_ATTRIBUTE_KEY);

    let assignment = match parse_assignment(raw) {
        Ok(assignment) => assignment,
        Err(e) => {
            error!(line = e.line(), column = e.column(), error = %e, "Error parsing dealer assignment data");
            return emit(vec![ValidationError::from_violation(
                &Violation::MalformedAssignment,
                config.target(),
            )]);
        }
    };

    let errors = RuleEngine::new(directory)
        .with_policy(config.assignment_policy())
        .with_target(config.target())
        .validate(&input.cart.snapshot(), assignment.as_ref(), now);

    info!(
        assigned = assignment.is_some(),
        errors = errors.len(),
        "Dealer assignment validation complete"
    );
    emit(errors)
}
