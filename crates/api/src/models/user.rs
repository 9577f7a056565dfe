//! User model.

use chrono::{DateTime, Utc};
use ladle_core::{Email, UserId};
use serde::Serialize;

/// A registered user.
///
/// The password hash lives in the same table but is never part of this
/// model; only the login path reads it, through
/// [`UserRepository::password_hash_by_email`].
///
/// [`UserRepository::password_hash_by_email`]: crate::db::users::UserRepository::password_hash_by_email
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    #[sqlx(json)]
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
