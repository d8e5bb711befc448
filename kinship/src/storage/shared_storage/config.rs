//! Configuration for shared storage

/// Namespace and database selected on the SurrealDB connection
#[derive(Debug, Clone)]
pub struct SharedStorageConfig {
    pub namespace: String,
    pub database: String,
}

impl Default for SharedStorageConfig {
    fn default() -> Self {
        Self {
            namespace: "kinship".to_string(),
            database: "main".to_string(),
        }
    }
}
