//! Post entity - a versioned, mutable post

use chrono::{DateTime, Utc};

use crate::entities::Comment;
use crate::value_objects::Id;

/// Version every post starts at
pub const INITIAL_VERSION: i64 = 0;

/// Post entity
///
/// `version` is the optimistic lock: an update only lands when the caller
/// presents the version currently stored, and each landed update bumps it
/// by exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub user_id: Id,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
    /// Loaded separately; point lookups leave this empty
    pub comments: Vec<Comment>,
}

impl Post {
    /// Replace the editable fields, keeping identity and version
    pub fn edit(&mut self, title: String, content: String, tags: Vec<String>) {
        self.title = title;
        self.content = content;
        self.tags = tags;
    }

    /// Check if the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check if the post has never been updated
    #[inline]
    pub fn is_pristine(&self) -> bool {
        self.version == INITIAL_VERSION
    }
}

/// Values needed to publish a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: Id,
    pub tags: Vec<String>,
}

impl NewPost {
    /// Create a new post draft
    pub fn new(user_id: Id, title: String, content: String) -> Self {
        Self {
            title,
            content,
            user_id,
            tags: Vec::new(),
        }
    }

    /// Attach tags to the draft
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A post as it appears in a personalized feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub post: Post,
    pub author_username: String,
    pub comment_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = Utc::now();
        Post {
            id: Id::new(1),
            title: "Hello".to_string(),
            content: "World".to_string(),
            user_id: Id::new(7),
            tags: vec!["tech".to_string()],
            created_at: now,
            updated_at: now,
            version: INITIAL_VERSION,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_edit_keeps_identity_and_version() {
        let mut post = sample_post();
        post.edit(
            "New title".to_string(),
            "New content".to_string(),
            vec!["life".to_string()],
        );
        assert_eq!(post.id, Id::new(1));
        assert_eq!(post.version, INITIAL_VERSION);
        assert_eq!(post.title, "New title");
        assert!(post.has_tag("life"));
        assert!(!post.has_tag("tech"));
    }

    #[test]
    fn test_is_pristine() {
        let mut post = sample_post();
        assert!(post.is_pristine());
        post.version += 1;
        assert!(!post.is_pristine());
    }

    #[test]
    fn test_new_post_with_tags() {
        let draft = NewPost::new(Id::new(3), "t".to_string(), "c".to_string())
            .with_tags(["tech", "life"]);
        assert_eq!(draft.tags, vec!["tech".to_string(), "life".to_string()]);
    }
}
