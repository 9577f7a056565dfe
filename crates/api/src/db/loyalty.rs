//! Loyalty account repository.

use chrono::Utc;
use ladle_core::UserId;
use sqlx::SqlitePool;

use super::{RepositoryError, conflict_on_foreign_key};
use crate::models::LoyaltyAccount;

const LOYALTY_COLUMNS: &str = "loyalty_id, user_id, points, updated_at";

/// Repository for loyalty point balances.
pub struct LoyaltyRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LoyaltyRepository<'a> {
    /// Create a new loyalty repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every loyalty account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<LoyaltyAccount>, RepositoryError> {
        let accounts = sqlx::query_as::<_, LoyaltyAccount>(&format!(
            "SELECT {LOYALTY_COLUMNS} FROM loyalty_accounts ORDER BY loyalty_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    /// A user's point balance, `None` when no account exists yet.
    ///
    /// Accounts are created lazily on first credit, so absence simply
    /// means zero accrued points.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn points_for_user(&self, user_id: UserId) -> Result<Option<i64>, RepositoryError> {
        let points = sqlx::query_scalar::<_, i64>(
            "SELECT points FROM loyalty_accounts WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(points)
    }

    /// Apply a point delta to a user's account, creating the account on
    /// first use.
    ///
    /// Returns `None` when the delta would take the balance negative; the
    /// balance is left untouched. The guard runs in SQL so concurrent
    /// deltas cannot slip below zero between a read and a write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_points(
        &self,
        user_id: UserId,
        delta: i64,
    ) -> Result<Option<LoyaltyAccount>, RepositoryError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO loyalty_accounts (user_id, points, updated_at) VALUES (?1, 0, ?2) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_on_foreign_key(e, "user does not exist"))?;

        let account = sqlx::query_as::<_, LoyaltyAccount>(&format!(
            "UPDATE loyalty_accounts SET points = points + ?2, updated_at = ?3 \
             WHERE user_id = ?1 AND points + ?2 >= 0 \
             RETURNING {LOYALTY_COLUMNS}"
        ))
        .bind(user_id)
        .bind(delta)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(account)
    }
}
