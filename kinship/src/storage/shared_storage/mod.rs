//! SurrealDB-backed storage shared by every store trait

mod base;
mod config;
mod person;
mod relation;
mod schema;
mod user;

pub use base::SharedStorage;
pub use config::SharedStorageConfig;
