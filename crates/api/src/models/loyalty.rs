//! Loyalty account model.

use chrono::{DateTime, Utc};
use ladle_core::{LoyaltyAccountId, UserId};
use serde::Serialize;

/// Per-user running point balance tied to order activity.
///
/// One account per user, created lazily on first credit. The points
/// counter never goes negative.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LoyaltyAccount {
    pub loyalty_id: LoyaltyAccountId,
    pub user_id: UserId,
    pub points: i64,
    pub updated_at: DateTime<Utc>,
}
