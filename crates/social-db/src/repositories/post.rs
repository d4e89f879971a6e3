//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use social_core::traits::{PostRepository, RepoResult};
use social_core::{DomainError, FeedItem, FeedQuery, Id, NewPost, Post};

use crate::config::RepositoryConfig;
use crate::deadline::with_deadline;
use crate::mappers::PostWrite;
use crate::models::{FeedItemModel, PostModel};

use super::error::{map_author_fk_error, map_db_error, post_not_found};
use super::feed::build_feed_query;

/// PostgreSQL implementation of PostRepository
///
/// Updates are optimistic: a write only lands when the caller's `version`
/// still matches the stored row.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
    config: RepositoryConfig,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let write = PostWrite::from_new(post);
        let author = post.user_id;

        with_deadline(self.config.query_timeout, "posts.create", async move {
            let model = sqlx::query_as::<_, PostModel>(
                r"
                INSERT INTO posts (title, content, user_id, tags)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title, content, user_id, tags, created_at, updated_at, version
                ",
            )
            .bind(write.title)
            .bind(write.content)
            .bind(write.user_id)
            .bind(write.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_author_fk_error(e, author))?;

            Ok(Post::from(model))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Id) -> RepoResult<Post> {
        with_deadline(self.config.query_timeout, "posts.get_by_id", async {
            let result = sqlx::query_as::<_, PostModel>(
                r"
                SELECT id, title, content, user_id, tags, created_at, updated_at, version
                FROM posts
                WHERE id = $1
                ",
            )
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            result.map(Post::from).ok_or_else(|| post_not_found(id))
        })
        .await
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, version = post.version))]
    async fn update(&self, post: &Post) -> RepoResult<Post> {
        let write = PostWrite::from_post(post);
        let (id, expected) = (post.id, post.version);

        with_deadline(self.config.query_timeout, "posts.update", async move {
            let result = sqlx::query_as::<_, PostModel>(
                r"
                UPDATE posts
                SET title = $3, content = $4, tags = $5,
                    version = version + 1, updated_at = NOW()
                WHERE id = $1 AND version = $2
                RETURNING id, title, content, user_id, tags, created_at, updated_at, version
                ",
            )
            .bind(id.into_inner())
            .bind(expected)
            .bind(write.title)
            .bind(write.content)
            .bind(write.tags)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            match result {
                Some(model) => Ok(Post::from(model)),
                None => {
                    debug!(post_id = %id, expected, "version check failed");
                    Err(DomainError::VersionConflict { id, expected })
                }
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        with_deadline(self.config.query_timeout, "posts.delete", async {
            let result = sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(post_not_found(id));
            }

            Ok(())
        })
        .await
    }

    #[instrument(skip(self, query), fields(limit = query.limit, offset = query.offset))]
    async fn get_user_feed(&self, user_id: Id, query: &FeedQuery) -> RepoResult<Vec<FeedItem>> {
        let query = query.clone().validated()?;

        with_deadline(self.config.query_timeout, "posts.get_user_feed", async {
            let mut qb = build_feed_query(user_id, &query);
            let results = qb
                .build_query_as::<FeedItemModel>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

            Ok(results.into_iter().map(FeedItem::from).collect())
        })
        .await
    }
}
