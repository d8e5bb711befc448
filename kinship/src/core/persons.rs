//! Person CRUD scoped to the owning user

use super::KinshipManager;
use crate::models::{Person, PersonUpdate};
use crate::{KinshipError, Result};

impl KinshipManager {
    /// Store a new person owned by `user_id`
    pub async fn create_person(&self, user_id: &str, mut person: Person) -> Result<Person> {
        if person.first_name.trim().is_empty() {
            return Err(KinshipError::Validation("firstName is required".to_string()));
        }

        person.owner_id = user_id.to_string();
        let created = self.storage.create_person(person).await?;

        tracing::info!(person_id = %created.id, owner_id = user_id, "Person created");
        Ok(created)
    }

    pub async fn get_person(&self, person_id: &str, user_id: &str) -> Result<Person> {
        self.assert_owned(person_id, user_id).await
    }

    pub async fn update_person(
        &self,
        person_id: &str,
        user_id: &str,
        update: PersonUpdate,
    ) -> Result<Person> {
        if update
            .first_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(KinshipError::Validation("firstName cannot be empty".to_string()));
        }

        let mut person = self.assert_owned(person_id, user_id).await?;
        person.apply(update);

        Ok(self.storage.update_person(person).await?)
    }

    /// Delete a person together with every relation touching it.
    ///
    /// Returns the number of relations removed.
    pub async fn delete_person(&self, person_id: &str, user_id: &str) -> Result<usize> {
        self.assert_owned(person_id, user_id).await?;

        let removed = self.storage.delete_relations_for_person(person_id).await?;
        if !self.storage.delete_person(person_id).await? {
            return Err(KinshipError::NotFound(format!(
                "Person '{}' not found",
                person_id
            )));
        }

        tracing::info!(person_id, relations_removed = removed, "Person deleted");
        Ok(removed)
    }

    /// Persons owned by `user_id`, ordered by last then first name
    pub async fn list_persons(&self, user_id: &str) -> Result<Vec<Person>> {
        Ok(self.storage.list_persons_by_owner(user_id).await?)
    }
}
