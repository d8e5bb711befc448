//! Configuration system for Kinship.
//!
//! Configuration is layered: built-in defaults, then an optional TOML/YAML/JSON
//! file, then `KINSHIP_`-prefixed environment variables.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the loader will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "kinship.toml",
    "kinship.yaml",
    "kinship.yml",
    "kinship.json",
];

/// Environment variable prefix for Kinship configuration
pub const ENV_PREFIX: &str = "KINSHIP_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
