//! Database access for the Ladle service.
//!
//! # Tables
//!
//! - `users` - Accounts with argon2 password hashes
//! - `menu_items` - The catalog (prices in integer cents)
//! - `carts` / `cart_items` - Per-user staging areas
//! - `orders` / `order_items` - Placed orders and their line snapshots
//! - `loyalty_accounts` - Per-user point balances
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/api/migrations/` and applied at
//! startup via [`run_migrations`]. A failure there is logged and the
//! process keeps serving; every later query then fails per-request.

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod cart_items;
pub mod carts;
pub mod loyalty;
pub mod menu_items;
pub mod order_items;
pub mod orders;
pub mod users;

pub use cart_items::CartItemRepository;
pub use carts::CartRepository;
pub use loyalty::LoyaltyRepository;
pub use menu_items::MenuItemRepository;
pub use order_items::OrderItemRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Errors produced by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness or foreign-key constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced row does not exist.
    #[error("row not found")]
    NotFound,
}

/// Create the service's single persistence session.
///
/// The pool is capped at one connection and built lazily, so an
/// unreachable store surfaces as per-request errors rather than a crash
/// at startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database URL cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(options))
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if the store is unreachable or a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}

/// Map a foreign-key violation to [`RepositoryError::Conflict`].
fn conflict_on_foreign_key(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}
