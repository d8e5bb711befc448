//! Persistence for persons, relations and local users

pub mod errors;
pub mod shared_storage;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use shared_storage::{SharedStorage, SharedStorageConfig};
pub use traits::{BaseStore, KinshipStore, PersonStore, RelationStore, UserStore};

use crate::config::{KinshipConfig, StorageEngine};

/// Create the storage service selected by the configuration
pub async fn create_storage_service(
    config: &KinshipConfig,
) -> Result<Box<dyn KinshipStore>, StorageError> {
    let shared_config = SharedStorageConfig {
        namespace: config.storage.namespace.clone(),
        database: config.storage.database.clone(),
    };

    match config.storage.engine {
        StorageEngine::Memory => {
            tracing::info!("Creating SharedStorage with in-memory engine");
            let client = surrealdb::Surreal::new::<surrealdb::engine::local::Mem>(())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create memory client: {}", e))
                })?;
            let shared_storage = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(shared_storage))
        }
        #[cfg(feature = "surrealdb-embedded")]
        StorageEngine::RocksDb => {
            let path = config
                .storage
                .data_dir
                .join("kinship.db")
                .to_string_lossy()
                .into_owned();
            tracing::info!("Creating SharedStorage with RocksDB engine at {}", path);

            std::fs::create_dir_all(&config.storage.data_dir).map_err(|e| {
                StorageError::Connection(format!(
                    "Failed to create data directory {}: {}",
                    config.storage.data_dir.display(),
                    e
                ))
            })?;

            let client = surrealdb::Surreal::new::<surrealdb::engine::local::RocksDb>(&path)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to open RocksDB storage: {}", e))
                })?;
            let shared_storage = SharedStorage::new(client, shared_config).await?;
            Ok(Box::new(shared_storage))
        }
        #[cfg(not(feature = "surrealdb-embedded"))]
        StorageEngine::RocksDb => Err(StorageError::Connection(
            "RocksDB storage requires the surrealdb-embedded feature".to_string(),
        )),
    }
}
