//! Comment entity - an append-only reply to a post

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// Minimal author identity shown next to a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: Id,
    pub username: String,
}

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: CommentAuthor,
}

/// Values needed to add a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Id,
    pub user_id: Id,
    pub content: String,
}

impl NewComment {
    pub fn new(post_id: Id, user_id: Id, content: String) -> Self {
        Self {
            post_id,
            user_id,
            content,
        }
    }

    /// Check if the comment has no visible content
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        let comment = NewComment::new(Id::new(1), Id::new(2), "  \n".to_string());
        assert!(comment.is_blank());

        let comment = NewComment::new(Id::new(1), Id::new(2), "Nice post".to_string());
        assert!(!comment.is_blank());
    }
}
