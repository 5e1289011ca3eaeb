//! User API endpoints
//!
//! GET    /api/users - List users
//! GET    /api/users/:id - Get user details
//! POST   /api/users - Create a new user
//! PUT    /api/users/:id - Update a user
//! DELETE /api/users/:id - Delete a user (cascades notifications)
//! POST   /api/users/login - Password login

use axum::{extract::Path, routing::get, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use sentinel_core::{NewUser, Role, User, UserManagement, UserPatch};

use super::error::{ApiError, ErrorDetail};

/// User view for API responses; never exposes the stored password.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[schema(value_type = String)]
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Request to create a user. Role falls back to FleetManager.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
}

/// Request to update a user; omitted fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
}

/// Login credentials.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Confirmation message for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageView {
    pub message: String,
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserView>)
    )
)]
pub async fn list_users(
    Extension(users): Extension<Arc<dyn UserManagement>>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let all = users.list_users().await?;
    Ok(Json(all.iter().map(UserView::from).collect()))
}

/// Get user details
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserView),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn get_user(
    Extension(users): Extension<Arc<dyn UserManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = users.get_user(id).await?;
    Ok(Json(UserView::from(&user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = UserView),
        (status = 400, description = "Email already registered", body = ErrorDetail),
        (status = 422, description = "Malformed request body")
    )
)]
pub async fn create_user(
    Extension(users): Extension<Arc<dyn UserManagement>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    let user = users
        .create_user(NewUser {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
        })
        .await?;
    Ok(Json(UserView::from(&user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn update_user(
    Extension(users): Extension<Arc<dyn UserManagement>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    let user = users
        .update_user(
            UserPatch {
                name: request.name,
                email: request.email,
                password: request.password,
                role: request.role,
            },
            id,
        )
        .await?;
    Ok(Json(UserView::from(&user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageView),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn delete_user(
    Extension(users): Extension<Arc<dyn UserManagement>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageView>, ApiError> {
    users.delete_user(id).await?;
    Ok(Json(MessageView {
        message: format!("User with id {} deleted successfully", id),
    }))
}

/// Password login
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated user", body = UserView),
        (status = 401, description = "Invalid email or password", body = ErrorDetail)
    )
)]
pub async fn login(
    Extension(users): Extension<Arc<dyn UserManagement>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserView>, ApiError> {
    let user = users.login(&request.email, &request.password).await?;
    Ok(Json(UserView::from(&user)))
}

/// Create user routes
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/login", post(login))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}
