//! # Validation Configuration
//!
//! Configuration management for the validation function.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DEALER_ASSIGNMENT_POLICY=required                                  │
//! │     DEALER_DIRECTORY_PATH=/etc/starboard/dealers.toml                  │
//! │     DEALER_ERROR_TARGET=cart                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/dealer-validation/validation.toml (Linux)                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     optional assignment, built-in directory, target "cart"             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # validation.toml
//! [policy]
//! assignment = "optional"  # optional | required
//!
//! [directory]
//! path = "/etc/starboard/dealers.toml"  # omit for the built-in dealers
//!
//! [errors]
//! target = "cart"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use dealer_core::{AssignmentPolicy, CART_TARGET};

use crate::error::{FunctionError, FunctionResult};

pub const ENV_ASSIGNMENT_POLICY: &str = "DEALER_ASSIGNMENT_POLICY";
pub const ENV_DIRECTORY_PATH: &str = "DEALER_DIRECTORY_PATH";
pub const ENV_ERROR_TARGET: &str = "DEALER_ERROR_TARGET";

// =============================================================================
// Sections
// =============================================================================

/// Checkout policy settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Whether a cart without any dealer assignment may proceed.
    #[serde(default)]
    pub assignment: AssignmentPolicy,
}

/// Where dealer reference data comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// `[[dealers]]` TOML file. `None` uses the built-in directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// How errors are addressed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSettings {
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    CART_TARGET.to_string()
}

impl Default for ErrorSettings {
    fn default() -> Self {
        ErrorSettings {
            target: default_target(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete function configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub policy: PolicySettings,

    #[serde(default)]
    pub directory: DirectorySettings,

    #[serde(default)]
    pub errors: ErrorSettings,
}

impl ValidationConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (validation.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> FunctionResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(FunctionError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads the file layer alone, without environment overrides.
    pub fn from_file(path: &Path) -> FunctionResult<Self> {
        info!(?path, "Loading validation config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document without touching the environment.
    pub fn from_toml(contents: &str) -> FunctionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FunctionResult<()> {
        if self.errors.target.trim().is_empty() {
            return Err(FunctionError::InvalidConfig(
                "errors.target must not be empty".into(),
            ));
        }

        if let Some(ref path) = self.directory.path {
            if !path.exists() {
                return Err(FunctionError::InvalidConfig(format!(
                    "directory file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(policy) = lookup(ENV_ASSIGNMENT_POLICY) {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding assignment policy from environment");
                    self.policy.assignment = parsed;
                }
                Err(e) => warn!(%e, "Ignoring assignment policy from environment"),
            }
        }

        if let Some(path) = lookup(ENV_DIRECTORY_PATH) {
            debug!(path = %path, "Overriding directory path from environment");
            self.directory.path = (!path.is_empty()).then(|| PathBuf::from(path));
        }

        if let Some(target) = lookup(ENV_ERROR_TARGET) {
            self.errors.target = target;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "starboard", "dealer-validation")
            .map(|dirs| dirs.config_dir().join("validation.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn assignment_policy(&self) -> AssignmentPolicy {
        self.policy.assignment
    }

    pub fn target(&self) -> &str {
        &self.errors.target
    }
}
