//! Trait definitions for storage components

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::{Person, PersonRelation, User};
use crate::storage::errors::StorageError;

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Trait for person operations
#[async_trait]
pub trait PersonStore: BaseStore {
    /// Create a new person; an empty id is generated
    async fn create_person(&self, person: Person) -> Result<Person, StorageError>;

    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError>;

    /// Persist the mutable fields of an existing person
    async fn update_person(&self, person: Person) -> Result<Person, StorageError>;

    async fn delete_person(&self, id: &str) -> Result<bool, StorageError>;

    /// Persons owned by a user, ordered by last then first name
    async fn list_persons_by_owner(&self, owner_id: &str) -> Result<Vec<Person>, StorageError>;

    async fn count_persons_by_owner(&self, owner_id: &str) -> Result<usize, StorageError>;
}

/// Trait for relation operations
#[async_trait]
pub trait RelationStore: BaseStore {
    /// Insert a directed edge.
    ///
    /// Returns [`StorageError::AlreadyExists`] if any edge already links the
    /// same unordered pair of persons.
    async fn create_relation(&self, relation: PersonRelation)
    -> Result<PersonRelation, StorageError>;

    /// Edges where the person is either endpoint
    async fn list_relations_for_person(
        &self,
        person_id: &str,
    ) -> Result<Vec<PersonRelation>, StorageError>;

    /// Remove every edge touching the person, returning how many were removed
    async fn delete_relations_for_person(&self, person_id: &str) -> Result<usize, StorageError>;

    async fn list_relations_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<PersonRelation>, StorageError>;
}

/// Trait for local user records
#[async_trait]
pub trait UserStore: BaseStore {
    async fn create_user(&self, user: User) -> Result<User, StorageError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    async fn find_user_by_external_id(&self, external_id: &str)
    -> Result<Option<User>, StorageError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
}

/// Everything the manager needs from storage
pub trait KinshipStore: PersonStore + RelationStore + UserStore {}

impl<T> KinshipStore for T where T: PersonStore + RelationStore + UserStore {}
