use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use super::NotificationManagement;
use crate::entities::{NewNotification, Notification, NotificationPatch};
use crate::error::{Error, Result};
use crate::event_bus::{topics, EventBus, HandlerFailure};
use crate::repository::{NotificationRepository, Repository, UserRepository};

/// Business rules for notifications.
pub struct NotificationService {
    repository: NotificationRepository,
    users: UserRepository,
    bus: Arc<EventBus>,
}

impl NotificationService {
    /// Create a service over `repository`, validating owners against `users`
    /// and publishing into `bus`.
    pub fn new(
        repository: NotificationRepository,
        users: UserRepository,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            repository,
            users,
            bus,
        }
    }

    async fn validate_user_exists(&self, user_id: i64) -> Result<()> {
        self.users
            .get(user_id)
            .await?
            .map(|_| ())
            .ok_or(Error::NotFound { entity: "User" })
    }

    fn log_failures(failures: &[HandlerFailure]) {
        for failure in failures {
            warn!(%failure, "event handler failed");
        }
    }
}

#[async_trait]
impl NotificationManagement for NotificationService {
    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.repository.get_all().await
    }

    async fn get_notification(&self, id: i64) -> Result<Notification> {
        self.repository.get(id).await?.ok_or(Error::NotFound {
            entity: "Notification",
        })
    }

    async fn create_notification(&self, data: NewNotification) -> Result<Notification> {
        self.validate_user_exists(data.user_id).await?;

        let notification = self.repository.create(data).await?;

        let failures = self
            .bus
            .publish(
                topics::NOTIFICATION_CREATED,
                json!({
                    "notification_id": notification.id,
                    "user_id": notification.user_id,
                }),
            )
            .await;
        Self::log_failures(&failures);

        info!(
            notification_id = notification.id,
            user_id = notification.user_id,
            "notification created"
        );
        Ok(notification)
    }

    async fn update_notification(&self, data: NotificationPatch, id: i64) -> Result<Notification> {
        let notification = self.repository.update(data, id).await?.ok_or(Error::NotFound {
            entity: "Notification",
        })?;

        let failures = self
            .bus
            .publish(
                topics::NOTIFICATION_UPDATED,
                json!({
                    "notification_id": notification.id,
                    "user_id": notification.user_id,
                }),
            )
            .await;
        Self::log_failures(&failures);

        Ok(notification)
    }

    async fn delete_notification(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(Error::NotFound {
                entity: "Notification",
            });
        }

        let failures = self
            .bus
            .publish(topics::NOTIFICATION_DELETED, json!({ "notification_id": id }))
            .await;
        Self::log_failures(&failures);

        Ok(())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.validate_user_exists(user_id).await?;
        self.repository.list_for_user(user_id).await
    }

    async fn mark_read(&self, id: i64) -> Result<Notification> {
        let notification = self.repository.mark_read(id).await?.ok_or(Error::NotFound {
            entity: "Notification",
        })?;

        let failures = self
            .bus
            .publish(
                topics::NOTIFICATION_READ,
                json!({
                    "notification_id": notification.id,
                    "user_id": notification.user_id,
                }),
            )
            .await;
        Self::log_failures(&failures);

        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: i64) -> Result<u64> {
        self.validate_user_exists(user_id).await?;

        let count = self.repository.mark_all_read_for_user(user_id).await?;

        let failures = self
            .bus
            .publish(
                topics::NOTIFICATION_READ_ALL,
                json!({ "user_id": user_id, "count": count }),
            )
            .await;
        Self::log_failures(&failures);

        info!(user_id, count, "notifications marked read");
        Ok(count)
    }

    async fn delete_all_for_user(&self, user_id: i64) -> Result<u64> {
        self.validate_user_exists(user_id).await?;

        let count = self.repository.delete_all_for_user(user_id).await?;
        info!(user_id, count, "notifications deleted");
        Ok(count)
    }
}
