//! Service layer
//!
//! Enforces domain invariants and sequences side effects around repository
//! calls. Each capability set has an explicit trait contract; the HTTP layer
//! and the observers depend on the traits, not the concrete services.

mod notifications;
mod users;


pub use notifications::NotificationService;
pub use users::UserService;

use async_trait::async_trait;

use crate::entities::{
    NewNotification, NewUser, Notification, NotificationPatch, User, UserPatch,
};
use crate::error::Result;

/// User account operations.
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// All users.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// One user; unknown id is [`Error::NotFound`](crate::Error::NotFound).
    async fn get_user(&self, id: i64) -> Result<User>;

    /// Create a user and publish `user.created`. A registered email is
    /// rejected with [`Error::EmailTaken`](crate::Error::EmailTaken) before
    /// any write.
    async fn create_user(&self, data: NewUser) -> Result<User>;

    /// Partially update a user; unknown id is an error, never a no-op.
    async fn update_user(&self, data: UserPatch, id: i64) -> Result<User>;

    /// Delete a user (cascading their notifications); unknown id is an
    /// error.
    async fn delete_user(&self, id: i64) -> Result<()>;

    /// Plain password-equality login. Unknown email and wrong password both
    /// yield [`Error::InvalidCredentials`](crate::Error::InvalidCredentials).
    async fn login(&self, email: &str, password: &str) -> Result<User>;
}

/// Notification operations, including read tracking.
#[async_trait]
pub trait NotificationManagement: Send + Sync {
    /// All notifications.
    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    /// One notification; unknown id is an error.
    async fn get_notification(&self, id: i64) -> Result<Notification>;

    /// Create a notification for an existing user and publish
    /// `notification.created`.
    async fn create_notification(&self, data: NewNotification) -> Result<Notification>;

    /// Partially update a notification; unknown id is an error.
    async fn update_notification(&self, data: NotificationPatch, id: i64) -> Result<Notification>;

    /// Delete a notification; unknown id is an error.
    async fn delete_notification(&self, id: i64) -> Result<()>;

    /// A user's notifications, most recent first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>>;

    /// Mark one notification read and publish `notification.read`.
    async fn mark_read(&self, id: i64) -> Result<Notification>;

    /// Mark all of a user's notifications read; returns how many changed and
    /// publishes `notification.read_all`.
    async fn mark_all_read(&self, user_id: i64) -> Result<u64>;

    /// Delete all of a user's notifications; returns how many were removed.
    async fn delete_all_for_user(&self, user_id: i64) -> Result<u64>;
}
