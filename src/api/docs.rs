//! API Documentation - Swagger UI
//!
//! Provides OpenAPI documentation at /docs

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{
    error::ErrorDetail,
    notifications::{
        BulkDeleteView, CreateNotificationRequest, MarkAllReadView, NotificationView,
        UpdateNotificationRequest,
    },
    users::{CreateUserRequest, LoginRequest, MessageView, UpdateUserRequest, UserView},
};

/// Sentinel API OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sentinel API",
        version = "0.1.0",
        description = "Fleet-management backend REST API.

## Overview
Sentinel provides:
- **Users**: account CRUD and password login
- **Notifications**: per-user notifications with read tracking

Creating a user publishes a `user.created` event which produces a welcome
notification for the new account.
",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::login,
        // Notifications
        crate::api::notifications::list_notifications,
        crate::api::notifications::get_notification,
        crate::api::notifications::create_notification,
        crate::api::notifications::update_notification,
        crate::api::notifications::delete_notification,
        crate::api::notifications::mark_read,
        crate::api::notifications::list_for_user,
        crate::api::notifications::mark_all_read,
        crate::api::notifications::delete_all_for_user,
    ),
    components(
        schemas(
            ErrorDetail,
            // Users
            UserView,
            CreateUserRequest,
            UpdateUserRequest,
            LoginRequest,
            MessageView,
            // Notifications
            NotificationView,
            CreateNotificationRequest,
            UpdateNotificationRequest,
            MarkAllReadView,
            BulkDeleteView,
        )
    ),
    tags(
        (name = "users", description = "User accounts and login"),
        (name = "notifications", description = "Notifications and read tracking"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()))
}
