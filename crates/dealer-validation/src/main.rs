//! # Dealer Validation Function
//!
//! Reads one `RunInput` JSON document from stdin and writes the
//! `FunctionRunResult` to stdout. Logs go to stderr; stdout belongs to the
//! host protocol.
//!
//! ## Usage
//! ```bash
//! dealer-validation < input.json
//! dealer-validation --config ./validation.toml < input.json
//! RUST_LOG=debug DEALER_ASSIGNMENT_POLICY=required dealer-validation < input.json
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dealer_validation::directory::directory_for;
use dealer_validation::{run, FunctionError, FunctionResult, RunInput, ValidationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let config_path = parse_args(std::env::args().skip(1))?;
    let config = ValidationConfig::load(config_path)?;
    let directory = directory_for(&config)?;
    debug!(
        policy = %config.assignment_policy(),
        dealers = directory.len(),
        "Validation function ready"
    );

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let input: RunInput = serde_json::from_str(&raw)?;

    let result = run(&input, &directory, &config, Utc::now());

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &result)?;
    stdout.flush()?;
    Ok(())
}

/// `--config <path>` is the only option.
fn parse_args(mut args: impl Iterator<Item = String>) -> FunctionResult<Option<PathBuf>> {
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or_else(|| {
                    FunctionError::InvalidArgument("--config requires a path".into())
                })?;
                config_path = Some(PathBuf::from(path));
            }
            other => {
                return Err(FunctionError::InvalidArgument(format!(
                    "unknown argument '{other}'"
                )))
            }
        }
    }

    Ok(config_path)
}
