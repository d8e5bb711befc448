//! Local user storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, id_or_new, record_key, retry_on_conflict};
use crate::models::{User, UserRole};
use crate::storage::errors::StorageError;
use crate::storage::traits::UserStore;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealUser {
    id: RecordId,
    external_id: String,
    username: String,
    email: Option<String>,
    password_hash: Option<String>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct CreateUser {
    external_id: String,
    username: String,
    email: Option<String>,
    password_hash: Option<String>,
    role: UserRole,
}

impl From<SurrealUser> for User {
    fn from(surreal_user: SurrealUser) -> Self {
        Self {
            id: record_key(&surreal_user.id),
            external_id: surreal_user.external_id,
            username: surreal_user.username,
            email: surreal_user.email,
            password_hash: surreal_user.password_hash,
            role: surreal_user.role,
            created_at: surreal_user.created_at,
        }
    }
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn find_user_by_field(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Option<User>, StorageError> {
        let query = format!("SELECT * FROM user WHERE {} = $value LIMIT 1", field);
        let mut result = self
            .client
            .query(query)
            .bind(("value", value.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to query users: {}", e)))?;

        let users: Vec<SurrealUser> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        Ok(users.into_iter().next().map(User::from))
    }
}

#[async_trait]
impl<C> UserStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        let id = id_or_new(&user.id);

        let content = CreateUser {
            external_id: user.external_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };

        let id = id.as_str();
        let created = retry_on_conflict(|| {
            let content = content.clone();
            async move {
                let created: Result<Option<SurrealUser>, StorageError> = self
                    .client
                    .create(("user", id))
                    .content(content)
                    .await
                    .map_err(|e| StorageError::from_write("Failed to create user", e));
                created
            }
        })
        .await?;

        created
            .map(User::from)
            .ok_or_else(|| StorageError::Internal("No user created".to_string()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let user: Option<SurrealUser> = self
            .client
            .select(("user", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get user: {}", e)))?;

        Ok(user.map(User::from))
    }

    async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.find_user_by_field("external_id", external_id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        self.find_user_by_field("username", username).await
    }
}
