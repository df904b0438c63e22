//! PostgreSQL implementation of the user repository port.
//!
//! Maps between the `users` table and the domain `User` entity. The table
//! carries unique constraints on `username` and `email`; those constraints,
//! not the domain-service pre-flight checks, are the source of truth for
//! uniqueness under concurrent creation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;
use crate::domain::entities::{User, UserRepository};
use crate::domain::value_objects::{Email, Username};
use crate::shared::error::RepositoryError;

const SELECT_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     is_active, is_staff, is_admin, is_superuser, created_at, updated_at";

/// Database row shape for the `users` table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_active: bool,
    is_staff: bool,
    is_admin: bool,
    is_superuser: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert a database row to the domain entity. Stored values re-pass
    /// value-object validation; a failure means corrupt storage and is
    /// reported as an infrastructure error.
    fn into_user(self) -> Result<User, RepositoryError> {
        let username = Username::new(&self.username)
            .map_err(|e| RepositoryError::Database(format!("corrupt username in row: {e}")))?;
        let email = Email::new(&self.email)
            .map_err(|e| RepositoryError::Database(format!("corrupt email in row: {e}")))?;

        Ok(User {
            id: Some(self.id),
            username,
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_admin: self.is_admin,
            is_superuser: self.is_superuser,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a connection pool from settings.
    pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
            .connect(&settings.url)
            .await
    }

    async fn fetch_one_by(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE {column} = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        row.map(UserRow::into_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.fetch_one_by("username", username).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        // Same canonicalization as Email construction
        self.fetch_one_by("email", &email.trim().to_lowercase())
            .await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.trim().to_lowercase())
                .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from)?;

        Ok(exists)
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let row = match user.id {
            None => {
                let query = format!(
                    "INSERT INTO users \
                     (username, email, password_hash, first_name, last_name, \
                      is_active, is_staff, is_admin, is_superuser) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                     RETURNING {SELECT_COLUMNS}"
                );

                sqlx::query_as::<_, UserRow>(&query)
                    .bind(user.username.as_str())
                    .bind(user.email.as_str())
                    .bind(&user.password_hash)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(user.is_active)
                    .bind(user.is_staff)
                    .bind(user.is_admin)
                    .bind(user.is_superuser)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(RepositoryError::from)?
            }
            Some(id) => {
                let query = format!(
                    "UPDATE users \
                     SET username = $2, email = $3, password_hash = $4, \
                         first_name = $5, last_name = $6, is_active = $7, \
                         is_staff = $8, is_admin = $9, is_superuser = $10, \
                         updated_at = NOW() \
                     WHERE id = $1 \
                     RETURNING {SELECT_COLUMNS}"
                );

                sqlx::query_as::<_, UserRow>(&query)
                    .bind(id)
                    .bind(user.username.as_str())
                    .bind(user.email.as_str())
                    .bind(&user.password_hash)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(user.is_active)
                    .bind(user.is_staff)
                    .bind(user.is_admin)
                    .bind(user.is_superuser)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(RepositoryError::from)?
                    .ok_or_else(|| {
                        RepositoryError::Database(format!("user with id {id} vanished on update"))
                    })?
            }
        };

        row.into_user()
    }

    async fn delete(&self, user: &User) -> Result<(), RepositoryError> {
        // Never persisted: nothing to delete
        let Some(id) = user.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn get_active_users(&self) -> Result<Vec<User>, RepositoryError> {
        let query =
            format!("SELECT {SELECT_COLUMNS} FROM users WHERE is_active = TRUE ORDER BY id");

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
