//! Person storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{CountRow, SharedStorage, id_or_new, record_key};
use crate::models::Person;
use crate::storage::errors::StorageError;
use crate::storage::traits::PersonStore;

/// Internal representation of a Person record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealPerson {
    id: RecordId,
    owner: String,
    first_name: String,
    #[serde(default)]
    last_name: String,
    birth_date: Option<String>,
    death_date: Option<String>,
    birth_place: Option<String>,
    death_place: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Writable fields (timestamps handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct PersonContent {
    owner: String,
    first_name: String,
    last_name: String,
    birth_date: Option<String>,
    death_date: Option<String>,
    birth_place: Option<String>,
    death_place: Option<String>,
    notes: Option<String>,
}

impl From<&Person> for PersonContent {
    fn from(person: &Person) -> Self {
        Self {
            owner: person.owner_id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birth_date: person.birth_date.clone(),
            death_date: person.death_date.clone(),
            birth_place: person.birth_place.clone(),
            death_place: person.death_place.clone(),
            notes: person.notes.clone(),
        }
    }
}

impl From<SurrealPerson> for Person {
    fn from(surreal_person: SurrealPerson) -> Self {
        Self {
            id: record_key(&surreal_person.id),
            owner_id: surreal_person.owner,
            first_name: surreal_person.first_name,
            last_name: surreal_person.last_name,
            birth_date: surreal_person.birth_date,
            death_date: surreal_person.death_date,
            birth_place: surreal_person.birth_place,
            death_place: surreal_person.death_place,
            notes: surreal_person.notes,
            created_at: surreal_person.created_at,
            updated_at: surreal_person.updated_at,
        }
    }
}

#[async_trait]
impl<C> PersonStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_person(&self, person: Person) -> Result<Person, StorageError> {
        let id = id_or_new(&person.id);

        let created: Option<SurrealPerson> = self
            .client
            .create(("person", id.as_str()))
            .content(PersonContent::from(&person))
            .await
            .map_err(|e| StorageError::from_write("Failed to create person", e))?;

        created
            .map(Person::from)
            .ok_or_else(|| StorageError::Internal("No person created".to_string()))
    }

    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let person: Option<SurrealPerson> = self
            .client
            .select(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get person: {}", e)))?;

        Ok(person.map(Person::from))
    }

    async fn update_person(&self, person: Person) -> Result<Person, StorageError> {
        // merge keeps created_at intact
        let updated: Option<SurrealPerson> = self
            .client
            .update(("person", person.id.as_str()))
            .merge(PersonContent::from(&person))
            .await
            .map_err(|e| StorageError::from_write("Failed to update person", e))?;

        updated
            .map(Person::from)
            .ok_or_else(|| StorageError::NotFound(format!("Person with ID {} not found", person.id)))
    }

    async fn delete_person(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealPerson> = self
            .client
            .delete(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete person: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_persons_by_owner(&self, owner_id: &str) -> Result<Vec<Person>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM person WHERE owner = $owner ORDER BY last_name, first_name")
            .bind(("owner", owner_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list persons: {}", e)))?;

        let persons: Vec<SurrealPerson> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract persons: {}", e)))?;

        Ok(persons.into_iter().map(Person::from).collect())
    }

    async fn count_persons_by_owner(&self, owner_id: &str) -> Result<usize, StorageError> {
        let mut result = self
            .client
            .query("SELECT count() AS count FROM person WHERE owner = $owner GROUP ALL")
            .bind(("owner", owner_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to count persons: {}", e)))?;

        let rows: Vec<CountRow> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract person count: {}", e)))?;

        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }
}
