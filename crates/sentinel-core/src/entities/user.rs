use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User roles within the fleet-management system.
///
/// Stored as TEXT in the `users.role` column using the variant names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum Role {
    /// Full system access and user management
    Administrator,
    /// Fleet management and oversight capabilities
    FleetManager,
    /// Basic access for viewing stats
    Driver,
}

impl Default for Role {
    fn default() -> Self {
        Role::FleetManager
    }
}

/// A registered user.
///
/// The password is stored and compared in plaintext, matching the recorded
/// behavior of the system this backend replaces.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Fields for inserting a new user. A missing role falls back to
/// [`Role::FleetManager`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Partial update; only `Some` fields overwrite the stored row.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}
