//! Dealer directory files.
//!
//! ```toml
//! [[dealers]]
//! id = "dealer_1"
//! name = "Pacific Windsurf Center"
//! phone = "+1-415-555-0123"
//! email = "info@pacificwindsurf.com"
//! supported_products = ["windsurf", "wingfoil"]
//! service_regions = ["CA", "OR", "WA"]
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use dealer_core::directory::{DealerProfile, StaticDirectory};

use crate::config::ValidationConfig;
use crate::error::FunctionResult;

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    dealers: Vec<DealerProfile>,
}

/// Parses a `[[dealers]]` document.
pub fn parse_directory(contents: &str) -> FunctionResult<StaticDirectory> {
    let file: DirectoryFile = toml::from_str(contents)?;
    Ok(StaticDirectory::from_profiles(file.dealers)?)
}

/// Reads and parses a directory file.
pub fn load_directory(path: &Path) -> FunctionResult<StaticDirectory> {
    let contents = std::fs::read_to_string(path)?;
    let directory = parse_directory(&contents)?;
    info!(?path, dealers = directory.len(), "Loaded dealer directory");
    Ok(directory)
}

/// The directory named by the config, or the built-in one.
pub fn directory_for(config: &ValidationConfig) -> FunctionResult<StaticDirectory> {
    match &config.directory.path {
        Some(path) => load_directory(path),
        None => Ok(StaticDirectory::builtin()),
    }
}
