//! Business logic above the repositories.
//!
//! - [`auth`] - Registration and login over argon2 password hashes
//! - [`orders`] - The order-placement workflow and status transitions

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
