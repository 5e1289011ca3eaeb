use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Notification severity, stored as lowercase TEXT in the
/// `notifications.notification_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Info
    }
}

/// A notification owned by a user.
///
/// Rows are removed together with their owner (`ON DELETE CASCADE`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "notification_type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new notification. `is_read` starts false and the
/// timestamps are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

/// Partial update; only `Some` fields overwrite the stored row. The owning
/// user of a notification never changes.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: Option<NotificationKind>,
    pub is_read: Option<bool>,
}
