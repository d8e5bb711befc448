//! Schema initialization for SharedStorage

use surrealdb::{Connection, Surreal};

use crate::storage::errors::StorageError;

/// Define tables and indexes. Safe to run against an existing database.
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    let user_table_query = r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS
        COMMENT "Local user records resolved from identity-provider subjects";

        DEFINE FIELD IF NOT EXISTS external_id ON user TYPE string;
        DEFINE FIELD IF NOT EXISTS username ON user TYPE string;
        DEFINE FIELD IF NOT EXISTS role ON user TYPE string DEFAULT "researcher";
        DEFINE FIELD IF NOT EXISTS created_at ON user TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS user_external_id_idx ON user FIELDS external_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS user_username_idx ON user FIELDS username UNIQUE;
    "#;

    let person_table_query = r#"
        DEFINE TABLE IF NOT EXISTS person SCHEMALESS
        COMMENT "Persons under research, each owned by one user";

        DEFINE FIELD IF NOT EXISTS owner ON person TYPE string;
        DEFINE FIELD IF NOT EXISTS first_name ON person TYPE string;
        DEFINE FIELD IF NOT EXISTS last_name ON person TYPE string DEFAULT "";
        DEFINE FIELD IF NOT EXISTS created_at ON person TYPE datetime DEFAULT time::now();
        DEFINE FIELD IF NOT EXISTS updated_at ON person TYPE datetime VALUE time::now();

        DEFINE INDEX IF NOT EXISTS person_owner_idx ON person FIELDS owner;
    "#;

    // pair_key is the sorted "low:high" person pair; the unique index is what
    // rejects a second edge between the same two persons
    let relation_table_query = r#"
        DEFINE TABLE IF NOT EXISTS person_relation SCHEMALESS
        COMMENT "Directed relationship edges between persons";

        DEFINE FIELD IF NOT EXISTS owner ON person_relation TYPE string;
        DEFINE FIELD IF NOT EXISTS from_person ON person_relation TYPE string;
        DEFINE FIELD IF NOT EXISTS to_person ON person_relation TYPE string;
        DEFINE FIELD IF NOT EXISTS relation_type ON person_relation TYPE string;
        DEFINE FIELD IF NOT EXISTS pair_key ON person_relation TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON person_relation TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS person_relation_pair_idx ON person_relation FIELDS pair_key UNIQUE;
        DEFINE INDEX IF NOT EXISTS person_relation_from_idx ON person_relation FIELDS from_person;
        DEFINE INDEX IF NOT EXISTS person_relation_to_idx ON person_relation FIELDS to_person;
        DEFINE INDEX IF NOT EXISTS person_relation_owner_idx ON person_relation FIELDS owner;
    "#;

    for (name, query) in [
        ("user", user_table_query),
        ("person", person_table_query),
        ("person_relation", relation_table_query),
    ] {
        client
            .query(query)
            .await
            .and_then(|response| response.check())
            .map_err(|e| {
                StorageError::Query(format!("Failed to define {} table: {}", name, e))
            })?;
    }

    tracing::debug!("Schema initialized");

    Ok(())
}
