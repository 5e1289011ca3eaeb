//! EventBus - in-process publish/subscribe for domain events.
//!
//! Decouples entity-mutation services from their reactions (e.g. the welcome
//! notification created on signup). Handlers are registered once on an
//! [`EventBusBuilder`] at startup; `build()` freezes the registry, so the bus
//! is immutable and safe to share for the rest of the process lifetime.

/// Core bus implementation (frozen registry, ordered dispatch).
pub mod bus;

pub use bus::{EventBus, EventBusBuilder, EventHandler, HandlerFailure};

/// Event names published by the services.
pub mod topics {
    /// A user was created; payload: `{user_id, username, email, role}`.
    pub const USER_CREATED: &str = "user.created";
    /// A notification was created; payload: `{notification_id, user_id}`.
    pub const NOTIFICATION_CREATED: &str = "notification.created";
    /// A notification was updated; payload: `{notification_id, user_id}`.
    pub const NOTIFICATION_UPDATED: &str = "notification.updated";
    /// A notification was deleted; payload: `{notification_id}`.
    pub const NOTIFICATION_DELETED: &str = "notification.deleted";
    /// A notification was marked read; payload: `{notification_id, user_id}`.
    pub const NOTIFICATION_READ: &str = "notification.read";
    /// All of a user's notifications were marked read; payload:
    /// `{user_id, count}`.
    pub const NOTIFICATION_READ_ALL: &str = "notification.read_all";
}
