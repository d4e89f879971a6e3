//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a comments row joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
}
