//! Sentinel Core - Domain Engine
//!
//! This crate provides the domain logic for the Sentinel fleet-management
//! backend, including:
//! - Entities: User and Notification row types
//! - Repository: uniform CRUD data access over SQLite
//! - Services: invariant enforcement and side-effect sequencing
//! - Event Bus: in-process publish/subscribe for domain events
//! - Observers: event reactions (welcome notification on signup)

#![forbid(unsafe_code)]

pub mod db;
pub mod entities;
pub mod error;
pub mod event_bus;
pub mod observers;
pub mod repository;
pub mod services;

pub use db::Database;
pub use entities::{
    NewNotification, NewUser, Notification, NotificationKind, NotificationPatch, Role, User,
    UserPatch,
};
pub use error::{Error, Result};
pub use event_bus::{topics, EventBus, EventBusBuilder, EventHandler, HandlerFailure};
pub use observers::WelcomeObserver;
pub use repository::{NotificationRepository, Repository, UserRepository};
pub use services::{NotificationManagement, NotificationService, UserManagement, UserService};
