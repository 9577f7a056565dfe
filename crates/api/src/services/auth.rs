//! Authentication service.
//!
//! Passwords are stored only as salted argon2 hashes; the hash never
//! leaves the database layer and is never serialized. Login failure is
//! deliberately uniform: an unknown email and a wrong password produce
//! the same error.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;
use thiserror::Error;

use ladle_core::{Email, EmailError, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; never distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet the minimum requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// The hashing primitive failed.
    #[error("password hashing error: {0}")]
    Hash(String),

    /// The repository layer failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Registration and login over the user repository.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        allergies: &[String],
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(name, &email, &password_hash, allergies)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user_id, password_hash) = self
            .users
            .password_hash_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user_id)
    }
}

/// Validate password strength requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
