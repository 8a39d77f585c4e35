//! # Function Error Types
//!
//! Failures of the function's own plumbing: config, directory file and the
//! stdin/stdout protocol.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Function Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Directory     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Directory      │  │  Json (stdin/stdout)    │ │
//! │  │  TomlDecode     │  │  (dealer-core)  │  │  Io                     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shopper-facing problems are never `FunctionError`s: they are
//! [`Violation`](dealer_core::Violation)s rendered into the result.

use thiserror::Error;

/// Result type alias for function plumbing.
pub type FunctionResult<T> = Result<T, FunctionError>;

#[derive(Debug, Error)]
pub enum FunctionError {
    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A command-line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A TOML file (config or directory) failed to decode.
    #[error("Failed to parse TOML: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// Input or output JSON failed to (de)serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dealer directory file is inconsistent.
    #[error("Directory error: {0}")]
    Directory(#[from] dealer_core::DirectoryError),

    /// Reading a file or a standard stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FunctionError::InvalidConfig("errors.target must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: errors.target must not be empty"
        );

        let err: FunctionError =
            dealer_core::DirectoryError::DuplicateDealer("dealer_1".into()).into();
        assert_eq!(
            err.to_string(),
            "Directory error: Duplicate dealer id in directory: dealer_1"
        );
    }
}
