//! User repository.

use chrono::Utc;
use ladle_core::{Email, UserId};
use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

/// Columns returned for every user read; the password hash is excluded
/// everywhere except the dedicated login lookup.
const USER_COLUMNS: &str = "user_id, name, email, allergies, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        allergies: &[String],
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, allergies, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(Json(allergies))
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        Ok(user)
    }

    /// Update a user's profile fields.
    ///
    /// Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        name: &str,
        email: &Email,
        allergies: &[String],
    ) -> Result<Option<User>, RepositoryError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = ?2, email = ?3, allergies = ?4, updated_at = ?5 \
             WHERE user_id = ?1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(Json(allergies))
        .bind(now)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        Ok(user)
    }

    /// Delete a user.
    ///
    /// No existence check is made first; deleting an absent id reports
    /// zero rows and the caller still treats it as success (the accepted
    /// idempotent-by-accident policy).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Fetch the id and password hash for a login attempt.
    ///
    /// Returns `None` if no account exists for the email; the caller must
    /// collapse that into the same failure as a bad password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn password_hash_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(UserId, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (UserId, String)>(
            "SELECT user_id, password_hash FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
