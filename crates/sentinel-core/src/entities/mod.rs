//! Persisted domain entities
//!
//! Row types plus the insert/patch shapes the repositories accept.

mod notification;
mod user;

pub use notification::{NewNotification, Notification, NotificationKind, NotificationPatch};
pub use user::{NewUser, Role, User, UserPatch};
