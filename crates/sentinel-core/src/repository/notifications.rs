use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::Repository;
use crate::db::Database;
use crate::entities::{NewNotification, Notification, NotificationPatch};
use crate::error::Result;

/// Repository for `notifications` rows.
///
/// Adds the read-tracking and per-owner bulk queries on top of the base
/// CRUD contract.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: Pool<Sqlite>,
}

impl NotificationRepository {
    /// Create a repository over the database's pool.
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// All notifications owned by `user_id`, most recent first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    /// Mark one notification read, returning the updated row or `None` if
    /// the id does not exist.
    pub async fn mark_read(&self, id: i64) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET is_read = TRUE, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    /// Mark every unread notification of `user_id` read; returns how many
    /// rows changed.
    pub async fn mark_all_read_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE, updated_at = ?
            WHERE user_id = ? AND is_read = FALSE
            "#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every notification of `user_id`; returns how many rows were
    /// removed.
    pub async fn delete_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Repository for NotificationRepository {
    type Entity = Notification;
    type New = NewNotification;
    type Patch = NotificationPatch;

    async fn get(&self, id: i64) -> Result<Option<Notification>> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(notification)
    }

    async fn get_all(&self) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>("SELECT * FROM notifications")
            .fetch_all(&self.pool)
            .await?;
        Ok(notifications)
    }

    async fn create(&self, fields: NewNotification) -> Result<Notification> {
        let now = Utc::now();
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, title, message, notification_type, is_read, created_at, updated_at)
            VALUES (?, ?, ?, ?, FALSE, ?, ?)
            RETURNING *
            "#,
        )
        .bind(fields.user_id)
        .bind(&fields.title)
        .bind(&fields.message)
        .bind(fields.kind)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn update(&self, fields: NotificationPatch, id: i64) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET
                title = COALESCE(?, title),
                message = COALESCE(?, message),
                notification_type = COALESCE(?, notification_type),
                is_read = COALESCE(?, is_read),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.message)
        .bind(fields.kind)
        .bind(fields.is_read)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
