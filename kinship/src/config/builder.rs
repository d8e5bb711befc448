//! Programmatic configuration builder.

use std::path::Path;

use super::{KinshipConfig, LogFormat, LogLevel, Result, StorageEngine, validation};

/// Builder for [`KinshipConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: KinshipConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already loaded configuration
    pub fn from_config(config: KinshipConfig) -> Self {
        Self { config }
    }

    /// In-memory storage, nothing touches disk
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.engine = StorageEngine::Memory;
        self
    }

    /// RocksDB storage under `data_dir`
    pub fn with_rocksdb_storage<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.config.storage.engine = StorageEngine::RocksDb;
        self.config.storage.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.config.storage.namespace = namespace.into();
        self.config.storage.database = database.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// bcrypt work factor; tests use the minimum to stay fast
    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.config.security.password_hash_cost = cost;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<KinshipConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}
