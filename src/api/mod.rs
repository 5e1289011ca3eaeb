//! Web API module for Sentinel
//!
//! Provides REST API endpoints for:
//! - User accounts and login
//! - Notifications with read tracking
//! - Health checks

pub mod docs;
pub mod error;
pub mod health;
pub mod notifications;
pub mod users;

#[cfg(test)]
mod tests;

use axum::Router;

pub use docs::docs_routes;
pub use health::health_routes;
pub use notifications::notifications_routes;
pub use users::users_routes;

/// Create the API router with all endpoints
pub fn api_router() -> Router {
    Router::new()
        .merge(users_routes())
        .merge(notifications_routes())
        .merge(health_routes())
        .merge(docs_routes())
}
