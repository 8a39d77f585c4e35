//! # Function Output
//!
//! Maps the rule engine's error list onto the host's accept/reject protocol.
//!
//! ```text
//! []                    ──► { "operations": [] }
//! [e1, e2, ...]         ──► { "operations": [ { "hide": { "errors": [e1, e2, ...] } } ] }
//! ```

use serde::Serialize;

use dealer_core::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FunctionRunResult {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Blocks checkout and shows the errors.
    Hide { errors: Vec<ValidationError> },
}

impl FunctionRunResult {
    /// Checkout may proceed.
    pub fn no_changes() -> Self {
        FunctionRunResult::default()
    }

    pub fn is_blocking(&self) -> bool {
        !self.operations.is_empty()
    }

    /// All errors carried by the result, in order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.operations.iter().flat_map(|operation| match operation {
            Operation::Hide { errors } => errors.iter(),
        })
    }
}

/// Emits the host result for `errors`, preserving order and content.
pub fn emit(errors: Vec<ValidationError>) -> FunctionRunResult {
    if errors.is_empty() {
        return FunctionRunResult::no_changes();
    }

    FunctionRunResult {
        operations: vec![Operation::Hide { errors }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_errors_proceed() {
        let result = emit(Vec::new());
        assert!(!result.is_blocking());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "operations": [] }));
    }

    #[test]
    fn test_errors_become_one_hide_operation() {
        let result = emit(vec![
            ValidationError::new("first", "cart"),
            ValidationError::new("first", "cart"),
            ValidationError::new("second", "cart"),
        ]);
        assert!(result.is_blocking());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "operations": [{
                    "hide": {
                        "errors": [
                            { "message": "first", "target": "cart" },
                            { "message": "first", "target": "cart" },
                            { "message": "second", "target": "cart" }
                        ]
                    }
                }]
            })
        );
        assert_eq!(result.errors().count(), 3);
    }
}
