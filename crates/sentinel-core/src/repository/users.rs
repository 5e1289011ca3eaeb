use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use super::Repository;
use crate::db::Database;
use crate::entities::{NewUser, User, UserPatch};
use crate::error::Result;

/// Repository for `users` rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: Pool<Sqlite>,
}

impl UserRepository {
    /// Create a repository over the database's pool.
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Look up a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl Repository for UserRepository {
    type Entity = User;
    type New = NewUser;
    type Patch = UserPatch;

    async fn get(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, fields: NewUser) -> Result<User> {
        let role = fields.role.unwrap_or_default();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.password)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, fields: UserPatch, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password = COALESCE(?, password),
                role = COALESCE(?, role)
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.password)
        .bind(fields.role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
