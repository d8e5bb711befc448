//! The manager through which every person, relation and user operation runs

mod persons;
mod relations;
mod stats;
mod users;

use std::sync::Arc;

use crate::config::KinshipConfig;
use crate::relationships::RelationshipTypeRegistry;
use crate::storage::KinshipStore;

pub use stats::DashboardStats;

/// Entry point for all operations; cheap to clone
#[derive(Debug, Clone)]
pub struct KinshipManager {
    storage: Arc<dyn KinshipStore>,
    registry: &'static RelationshipTypeRegistry,
    config: KinshipConfig,
}

impl KinshipManager {
    pub fn new(storage: Arc<dyn KinshipStore>, config: KinshipConfig) -> Self {
        Self {
            storage,
            registry: RelationshipTypeRegistry::global(),
            config,
        }
    }

    pub fn storage(&self) -> &Arc<dyn KinshipStore> {
        &self.storage
    }

    pub fn registry(&self) -> &'static RelationshipTypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &KinshipConfig {
        &self.config
    }

    /// Check that the storage backend answers
    pub async fn health_check(&self) -> crate::Result<bool> {
        Ok(self.storage.health_check().await?)
    }
}
