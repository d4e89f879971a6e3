//! Post entity <-> model mapper

use sqlx::types::Json;

use social_core::{normalize_tags, FeedItem, Id, NewPost, Post};

use crate::models::{FeedItemModel, PostModel};

/// Convert PostModel to Post entity
///
/// Comments are not part of the row and are left empty.
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Id::new(model.id),
            title: model.title,
            content: model.content,
            user_id: Id::new(model.user_id),
            tags: model.tags.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
            comments: Vec::new(),
        }
    }
}

/// Convert FeedItemModel to FeedItem
impl From<FeedItemModel> for FeedItem {
    fn from(model: FeedItemModel) -> Self {
        FeedItem {
            post: Post::from(model.post),
            author_username: model.author_username,
            comment_count: model.comment_count,
        }
    }
}

fn stored_tags(tags: &[String]) -> Json<Vec<String>> {
    Json(normalize_tags(tags).into_iter().map(str::to_owned).collect())
}

/// Column values for a post insert or update
pub struct PostWrite<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub user_id: i64,
    pub tags: Json<Vec<String>>,
}

impl<'a> PostWrite<'a> {
    pub fn from_new(post: &'a NewPost) -> Self {
        Self {
            title: &post.title,
            content: &post.content,
            user_id: post.user_id.into_inner(),
            tags: stored_tags(&post.tags),
        }
    }

    pub fn from_post(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            content: &post.content,
            user_id: post.user_id.into_inner(),
            tags: stored_tags(&post.tags),
        }
    }
}
