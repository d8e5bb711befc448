//! Person relation storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, id_or_new, record_key, retry_on_conflict};
use crate::models::{PairKey, PersonRelation};
use crate::storage::errors::StorageError;
use crate::storage::traits::RelationStore;

/// Internal representation of a PersonRelation record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealRelation {
    id: RecordId,
    owner: String,
    from_person: String,
    to_person: String,
    relation_type: String,
    pair_key: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct CreateRelation {
    owner: String,
    from_person: String,
    to_person: String,
    relation_type: String,
    pair_key: String,
    notes: Option<String>,
}

impl From<SurrealRelation> for PersonRelation {
    fn from(surreal_relation: SurrealRelation) -> Self {
        Self {
            id: record_key(&surreal_relation.id),
            owner_id: surreal_relation.owner,
            from_person_id: surreal_relation.from_person,
            to_person_id: surreal_relation.to_person,
            relation_type: surreal_relation.relation_type,
            notes: surreal_relation.notes,
            created_at: surreal_relation.created_at,
        }
    }
}

#[async_trait]
impl<C> RelationStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_relation(
        &self,
        relation: PersonRelation,
    ) -> Result<PersonRelation, StorageError> {
        let id = id_or_new(&relation.id);
        let pair_key = PairKey::new(&relation.from_person_id, &relation.to_person_id);

        let content = CreateRelation {
            owner: relation.owner_id,
            from_person: relation.from_person_id,
            to_person: relation.to_person_id,
            relation_type: relation.relation_type,
            pair_key: pair_key.to_string(),
            notes: relation.notes,
        };

        let id = id.as_str();
        let created = retry_on_conflict(|| {
            let content = content.clone();
            async move {
                let created: Result<Option<SurrealRelation>, StorageError> = self
                    .client
                    .create(("person_relation", id))
                    .content(content)
                    .await
                    .map_err(|e| StorageError::from_write("Failed to create relation", e));
                created
            }
        })
        .await?;

        created
            .map(PersonRelation::from)
            .ok_or_else(|| StorageError::Internal("No relation created".to_string()))
    }

    async fn list_relations_for_person(
        &self,
        person_id: &str,
    ) -> Result<Vec<PersonRelation>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM person_relation WHERE from_person = $person OR to_person = $person")
            .bind(("person", person_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list relations: {}", e)))?;

        let relations: Vec<SurrealRelation> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract relations: {}", e)))?;

        Ok(relations.into_iter().map(PersonRelation::from).collect())
    }

    async fn delete_relations_for_person(&self, person_id: &str) -> Result<usize, StorageError> {
        let mut result = self
            .client
            .query(
                "DELETE person_relation WHERE from_person = $person OR to_person = $person RETURN BEFORE",
            )
            .bind(("person", person_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete relations: {}", e)))?;

        let deleted: Vec<SurrealRelation> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to delete relations: {}", e)))?;

        Ok(deleted.len())
    }

    async fn list_relations_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<PersonRelation>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM person_relation WHERE owner = $owner")
            .bind(("owner", owner_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list relations: {}", e)))?;

        let relations: Vec<SurrealRelation> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract relations: {}", e)))?;

        Ok(relations.into_iter().map(PersonRelation::from).collect())
    }
}
