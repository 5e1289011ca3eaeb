//! Notification API endpoints
//!
//! GET    /api/notifications - List notifications
//! GET    /api/notifications/:id - Get notification details
//! POST   /api/notifications - Create a notification
//! PUT    /api/notifications/:id - Update a notification
//! DELETE /api/notifications/:id - Delete a notification
//! PUT    /api/notifications/:id/read - Mark one notification read
//! GET    /api/users/:id/notifications - A user's notifications, newest first
//! PUT    /api/users/:id/notifications/read-all - Mark a user's notifications read
//! DELETE /api/users/:id/notifications - Delete a user's notifications

use axum::{extract::Path, routing::get, routing::put, Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use sentinel_core::{
    NewNotification, Notification, NotificationKind, NotificationManagement, NotificationPatch,
};

use super::error::{ApiError, ErrorDetail};
use super::users::MessageView;

/// Notification view for API responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationView {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "notification_type")]
    #[schema(value_type = String)]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            is_read: notification.is_read,
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}

/// Request to create a notification. Type falls back to `info`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "notification_type")]
    #[schema(value_type = Option<String>)]
    pub kind: NotificationKind,
}

/// Request to update a notification; omitted fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNotificationRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "notification_type")]
    #[schema(value_type = Option<String>)]
    pub kind: Option<NotificationKind>,
    pub is_read: Option<bool>,
}

/// Result of a bulk mark-read.
#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadView {
    pub updated: u64,
}

/// Result of a bulk delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDeleteView {
    pub deleted: u64,
}

/// List all notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    responses(
        (status = 200, description = "List of notifications", body = Vec<NotificationView>)
    )
)]
pub async fn list_notifications(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let all = notifications.list_notifications().await?;
    Ok(Json(all.iter().map(NotificationView::from).collect()))
}

/// Get notification details
#[utoipa::path(
    get,
    path = "/api/notifications/{id}",
    tag = "notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification details", body = NotificationView),
        (status = 404, description = "Notification not found", body = ErrorDetail)
    )
)]
pub async fn get_notification(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<NotificationView>, ApiError> {
    let notification = notifications.get_notification(id).await?;
    Ok(Json(NotificationView::from(&notification)))
}

/// Create a notification
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 200, description = "Created notification", body = NotificationView),
        (status = 404, description = "Owning user not found", body = ErrorDetail)
    )
)]
pub async fn create_notification(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Json<NotificationView>, ApiError> {
    let notification = notifications
        .create_notification(NewNotification {
            user_id: request.user_id,
            title: request.title,
            message: request.message,
            kind: request.kind,
        })
        .await?;
    Ok(Json(NotificationView::from(&notification)))
}

/// Update a notification
#[utoipa::path(
    put,
    path = "/api/notifications/{id}",
    tag = "notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    request_body = UpdateNotificationRequest,
    responses(
        (status = 200, description = "Updated notification", body = NotificationView),
        (status = 404, description = "Notification not found", body = ErrorDetail)
    )
)]
pub async fn update_notification(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateNotificationRequest>,
) -> Result<Json<NotificationView>, ApiError> {
    let notification = notifications
        .update_notification(
            NotificationPatch {
                title: request.title,
                message: request.message,
                kind: request.kind,
                is_read: request.is_read,
            },
            id,
        )
        .await?;
    Ok(Json(NotificationView::from(&notification)))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageView),
        (status = 404, description = "Notification not found", body = ErrorDetail)
    )
)]
pub async fn delete_notification(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageView>, ApiError> {
    notifications.delete_notification(id).await?;
    Ok(Json(MessageView {
        message: format!("Notification with id {} deleted successfully", id),
    }))
}

/// Mark one notification read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationView),
        (status = 404, description = "Notification not found", body = ErrorDetail)
    )
)]
pub async fn mark_read(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<NotificationView>, ApiError> {
    let notification = notifications.mark_read(id).await?;
    Ok(Json(NotificationView::from(&notification)))
}

/// List a user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/users/{id}/notifications",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's notifications", body = Vec<NotificationView>),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn list_for_user(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let owned = notifications.list_for_user(id).await?;
    Ok(Json(owned.iter().map(NotificationView::from).collect()))
}

/// Mark all of a user's notifications read
#[utoipa::path(
    put,
    path = "/api/users/{id}/notifications/read-all",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Unread notifications marked read", body = MarkAllReadView),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn mark_all_read(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<MarkAllReadView>, ApiError> {
    let updated = notifications.mark_all_read(id).await?;
    Ok(Json(MarkAllReadView { updated }))
}

/// Delete all of a user's notifications
#[utoipa::path(
    delete,
    path = "/api/users/{id}/notifications",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's notifications were deleted", body = BulkDeleteView),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn delete_all_for_user(
    Extension(notifications): Extension<Arc<dyn NotificationManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<BulkDeleteView>, ApiError> {
    let deleted = notifications.delete_all_for_user(id).await?;
    Ok(Json(BulkDeleteView { deleted }))
}

/// Create notification routes
pub fn notifications_routes() -> Router {
    Router::new()
        .route(
            "/api/notifications",
            get(list_notifications).post(create_notification),
        )
        .route(
            "/api/notifications/:id",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .route("/api/notifications/:id/read", put(mark_read))
        .route(
            "/api/users/:id/notifications",
            get(list_for_user).delete(delete_all_for_user),
        )
        .route("/api/users/:id/notifications/read-all", put(mark_all_read))
}
