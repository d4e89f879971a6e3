//! Post database models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

/// Feed row: a post with its author's username and comment count
#[derive(Debug, Clone, FromRow)]
pub struct FeedItemModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub author_username: String,
    pub comment_count: i64,
}
