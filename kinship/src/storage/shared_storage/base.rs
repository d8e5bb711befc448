//! Base shared storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId, Surreal};
use uuid::Uuid;

use super::config::SharedStorageConfig;
use crate::storage::errors::StorageError;
use crate::storage::traits::BaseStore;

/// Storage over a single SurrealDB connection
#[derive(Debug)]
pub struct SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
    pub(crate) config: SharedStorageConfig,
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Select the namespace/database and make sure the schema exists
    pub async fn new(client: Surreal<C>, config: SharedStorageConfig) -> Result<Self, StorageError> {
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to set namespace/database: {}", e))
            })?;

        let storage = Self { client, config };
        super::schema::initialize_schema(&storage.client).await?;

        tracing::debug!(
            namespace = %storage.config.namespace,
            database = %storage.config.database,
            "Shared storage ready"
        );

        Ok(storage)
    }

    pub fn config(&self) -> &SharedStorageConfig {
        &self.config
    }
}

/// Extract the plain key from a record id.
///
/// `RecordId::key()` renders non-identifier keys wrapped in `⟨⟩`.
pub(crate) fn record_key(id: &RecordId) -> String {
    let key_string = id.key().to_string();
    key_string
        .strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .unwrap_or(&key_string)
        .to_string()
}

/// Use the given id, or generate one if it is empty
pub(crate) fn id_or_new(id: &str) -> String {
    if id.is_empty() {
        Uuid::new_v4().simple().to_string()
    } else {
        id.to_string()
    }
}

/// Attempts made for a write guarded by a unique index
pub(crate) const UNIQUE_WRITE_ATTEMPTS: usize = 5;

/// Run a write again while it loses commit races. Under contention one
/// transaction always commits, so a retried write either succeeds or is
/// rejected by the unique index it raced on.
pub(crate) async fn retry_on_conflict<T, F, Fut>(mut write: F) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, StorageError>>,
{
    let mut attempt = 1;
    loop {
        match write().await {
            Err(StorageError::TransactionConflict(message)) if attempt < UNIQUE_WRITE_ATTEMPTS => {
                tracing::debug!(attempt, "Retrying write after commit conflict: {}", message);
                attempt += 1;
                tokio::task::yield_now().await;
            }
            result => return result,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: usize,
}

#[async_trait]
impl<C> BaseStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        let _result = self
            .client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.client
            .query("DELETE person_relation; DELETE person; DELETE user;")
            .await
            .and_then(|response| response.check())
            .map_err(|e| StorageError::Query(format!("Failed to clear storage: {}", e)))?;

        Ok(())
    }
}
