//! Structured logging built on `tracing`.
//!
//! [`init`] installs a global fmt subscriber in the configured format. An
//! explicit filter directive (for example from a `--log-level` flag) takes
//! precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogLevel, LoggingConfig};

/// Targets that are too chatty at the application's level
const QUIET_TARGETS: &[&str] = &["surrealdb=warn", "surrealdb_core=warn"];

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Build the filter for a level or explicit directive
pub fn build_filter(level: LogLevel, directive: Option<&str>) -> Result<EnvFilter, LogError> {
    let base = directive
        .map(str::to_string)
        .unwrap_or_else(|| level.to_string());

    let mut filter =
        EnvFilter::try_new(&base).map_err(|e| LogError::InvalidFilter(format!("{}: {}", base, e)))?;

    for target in QUIET_TARGETS {
        let directive = target
            .parse()
            .map_err(|e| LogError::InvalidFilter(format!("{}: {}", target, e)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Initialize the global subscriber. A subscriber that is already installed
/// is left in place.
pub fn init(config: &LoggingConfig, directive: Option<&str>) -> Result<(), LogError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = build_filter(config.level, directive)?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Default => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| LogError::Subscriber(e.to_string()))
}
