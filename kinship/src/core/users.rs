//! Local user resolution and password accounts

use chrono::Utc;
use uuid::Uuid;

use super::KinshipManager;
use crate::models::{User, UserRole};
use crate::storage::StorageError;
use crate::{KinshipError, Result};

const MIN_PASSWORD_LENGTH: usize = 8;

impl KinshipManager {
    /// Find the local user for an identity-provider subject, creating it on
    /// first sight. Concurrent first requests for the same subject converge
    /// on one record.
    pub async fn resolve_local_user(&self, external_id: &str, username: &str) -> Result<User> {
        if external_id.trim().is_empty() {
            return Err(KinshipError::Unauthorized("Token has no subject".to_string()));
        }

        if let Some(user) = self.storage.find_user_by_external_id(external_id).await? {
            return Ok(user);
        }

        let username = if username.is_empty() {
            external_id.to_string()
        } else {
            username.to_string()
        };

        // A taken username gets the subject appended; the subject is unique
        for candidate in [username.clone(), format!("{}-{}", username, external_id)] {
            let user = User {
                id: String::new(),
                external_id: external_id.to_string(),
                username: candidate,
                email: None,
                password_hash: None,
                role: UserRole::default(),
                created_at: Utc::now(),
            };

            match self.storage.create_user(user).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, external_id, "Provisioned local user");
                    return Ok(user);
                }
                Err(StorageError::AlreadyExists(_)) => {
                    if let Some(user) = self.storage.find_user_by_external_id(external_id).await? {
                        return Ok(user);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(KinshipError::Conflict(format!(
            "Could not provision a local user for subject '{}'",
            external_id
        )))
    }

    /// Create a password account. Its external id is freshly generated and is
    /// what tokens issued for it carry as subject.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(KinshipError::Validation("username is required".to_string()));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(KinshipError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if self.storage.find_user_by_username(username).await?.is_some() {
            return Err(taken(username));
        }

        let password_hash = bcrypt::hash(password, self.config.security.password_hash_cost)
            .map_err(|e| KinshipError::Other(format!("Failed to hash password: {}", e)))?;

        let user = User {
            id: String::new(),
            external_id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
            password_hash: Some(password_hash),
            role: UserRole::Researcher,
            created_at: Utc::now(),
        };

        let created = self.storage.create_user(user).await.map_err(|e| match e {
            StorageError::AlreadyExists(_) => taken(username),
            other => KinshipError::Storage(other),
        })?;
        tracing::info!(user_id = %created.id, username = %created.username, "User registered");

        Ok(created)
    }

    /// Verify a username and password pair
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let invalid = || KinshipError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .storage
            .find_user_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(invalid());
        };

        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(invalid()),
            Err(e) => {
                tracing::error!(user_id = %user.id, "Password verification failed: {}", e);
                Err(invalid())
            }
        }
    }
}

fn taken(username: &str) -> KinshipError {
    KinshipError::Validation(format!("Username '{}' is already taken", username))
}
