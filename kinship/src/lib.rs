//! # Kinship
//!
//! Person and relationship records for historical and genealogical research.
//!
//! Persons belong to a single local user. Relations are directed edges between
//! two persons labelled with a relationship type from a fixed registry; reading
//! an edge from its `to` side yields the reciprocal label.
//!
//! ```rust,no_run
//! use kinship::prelude::*;
//!
//! # async fn example() -> kinship::Result<()> {
//! let manager = kinship::init(ConfigBuilder::new().with_memory_storage().build()?).await?;
//! let user = manager.resolve_local_user("subject-1", "ada").await?;
//!
//! let father = manager
//!     .create_person(&user.id, PersonBuilder::new(&user.id, "George").last_name("Byron").build())
//!     .await?;
//! let daughter = manager
//!     .create_person(&user.id, PersonBuilder::new(&user.id, "Ada").last_name("Byron").build())
//!     .await?;
//!
//! manager
//!     .create_relation(
//!         &user.id,
//!         CreateRelation {
//!             from_person_id: Some(daughter.id.clone()),
//!             to_person_id: Some(father.id.clone()),
//!             relation_type: Some("father".to_string()),
//!             notes: None,
//!         },
//!     )
//!     .await?;
//!
//! // George sees Ada as "child"
//! let relations = manager.list_relations(&father.id, &user.id).await?;
//! assert_eq!(relations[0].relation_type, "child");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod relationships;
pub mod storage;

use std::sync::Arc;

use crate::relationships::RegistryError;
use crate::storage::StorageError;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigLoader, KinshipConfig, LogLevel, StorageEngine};
    pub use crate::core::{DashboardStats, KinshipManager};
    pub use crate::models::{
        CreateRelation, CreatedRelation, Person, PersonBuilder, PersonRelation, PersonUpdate,
        RelationView, RelationshipTypesView, User, UserRole,
    };
    pub use crate::relationships::{RelationshipCategory, RelationshipTypeRegistry};
    pub use crate::{KinshipError, Result, init};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Kinship operations
#[derive(Debug, thiserror::Error)]
pub enum KinshipError {
    /// Missing or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Relationship label not present in the registry
    #[error("Invalid relationship type '{label}'")]
    InvalidRelationshipType {
        label: String,
        valid_types: Vec<String>,
    },

    /// Record missing, or not owned by the requesting user
    #[error("{0}")]
    NotFound(String),

    /// Write rejected because an equivalent record exists
    #[error("{0}")]
    Conflict(String),

    /// Credentials missing or wrong
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    #[error("{0}")]
    Other(String),
}

impl From<RegistryError> for KinshipError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidRelationshipType(label) => KinshipError::InvalidRelationshipType {
                label,
                valid_types: relationships::RelationshipTypeRegistry::global()
                    .labels()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
        }
    }
}

/// Result type for Kinship operations
pub type Result<T> = std::result::Result<T, KinshipError>;

/// Initialize Kinship with the provided configuration
///
/// Installs logging if nothing else has, opens storage and returns the
/// manager through which every operation runs.
pub async fn init(config: config::KinshipConfig) -> Result<core::KinshipManager> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging, None);

    let storage = storage::create_storage_service(&config).await?;
    let storage: Arc<dyn storage::KinshipStore> = Arc::from(storage);

    tracing::info!(engine = ?config.storage.engine, "Kinship storage initialized");

    Ok(core::KinshipManager::new(storage, config))
}
