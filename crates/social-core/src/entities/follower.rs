//! Follower edge - a directed "follows" relationship

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// Follower edge: `follower_id` follows `user_id`
///
/// At most one edge exists per ordered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follower {
    pub user_id: Id,
    pub follower_id: Id,
    pub created_at: DateTime<Utc>,
}
