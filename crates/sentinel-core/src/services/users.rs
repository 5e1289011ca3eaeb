use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use super::UserManagement;
use crate::entities::{NewUser, User, UserPatch};
use crate::error::{Error, Result};
use crate::event_bus::{topics, EventBus};
use crate::repository::{Repository, UserRepository};

/// Business rules for user accounts.
pub struct UserService {
    repository: UserRepository,
    bus: Arc<EventBus>,
}

impl UserService {
    /// Create a service over `repository`, publishing into `bus`.
    pub fn new(repository: UserRepository, bus: Arc<EventBus>) -> Self {
        Self { repository, bus }
    }
}

#[async_trait]
impl UserManagement for UserService {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.repository.get_all().await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        self.repository
            .get(id)
            .await?
            .ok_or(Error::NotFound { entity: "User" })
    }

    async fn create_user(&self, data: NewUser) -> Result<User> {
        if self.repository.find_by_email(&data.email).await?.is_some() {
            return Err(Error::EmailTaken);
        }

        let user = self.repository.create(data).await?;

        let failures = self
            .bus
            .publish(
                topics::USER_CREATED,
                json!({
                    "user_id": user.id,
                    "username": user.name,
                    "email": user.email,
                    "role": user.role,
                }),
            )
            .await;
        for failure in &failures {
            warn!(%failure, "event handler failed");
        }

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    async fn update_user(&self, data: UserPatch, id: i64) -> Result<User> {
        self.repository
            .update(data, id)
            .await?
            .ok_or(Error::NotFound { entity: "User" })
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(Error::NotFound { entity: "User" });
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        // Plaintext comparison, kept for parity with the system this
        // backend replaces.
        if user.password != password {
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }
}
