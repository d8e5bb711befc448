//! Configuration validation utilities.

use super::{ConfigError, KinshipConfig, SecurityConfig, StorageConfig, StorageEngine};

/// Validate the entire configuration.
pub fn validate_config(config: &KinshipConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_security_config(&config.security)?;

    Ok(())
}

fn validate_security_config(config: &SecurityConfig) -> Result<(), ConfigError> {
    // bcrypt accepts costs 4 through 31
    if !(4..=31).contains(&config.password_hash_cost) {
        return Err(ConfigError::ValidationError(format!(
            "Password hash cost must be between 4 and 31, got {}",
            config.password_hash_cost
        )));
    }

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.namespace.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB namespace cannot be empty".to_string(),
        ));
    }
    if config.database.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB database cannot be empty".to_string(),
        ));
    }
    if config.engine == StorageEngine::RocksDb && config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty when using RocksDB storage".to_string(),
        ));
    }

    Ok(())
}
