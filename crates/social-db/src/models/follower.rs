//! Follower database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for followers table
#[derive(Debug, Clone, FromRow)]
pub struct FollowerModel {
    pub user_id: i64,
    pub follower_id: i64,
    pub created_at: DateTime<Utc>,
}
