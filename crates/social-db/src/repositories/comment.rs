//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{CommentRepository, RepoResult};
use social_core::{Comment, DomainError, Id, NewComment};

use crate::config::RepositoryConfig;
use crate::deadline::with_deadline;
use crate::models::CommentModel;

use super::error::{map_comment_insert_error, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
    config: RepositoryConfig,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment), fields(post_id = %comment.post_id, user_id = %comment.user_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        if comment.is_blank() {
            return Err(DomainError::ValidationError(
                "Comment content must not be blank".to_string(),
            ));
        }

        with_deadline(self.config.query_timeout, "comments.create", async {
            let model = sqlx::query_as::<_, CommentModel>(
                r"
                WITH inserted AS (
                    INSERT INTO comments (post_id, user_id, content)
                    VALUES ($1, $2, $3)
                    RETURNING id, post_id, user_id, content, created_at
                )
                SELECT i.id, i.post_id, i.user_id, i.content, i.created_at,
                       u.username AS author_username
                FROM inserted i
                JOIN users u ON u.id = i.user_id
                ",
            )
            .bind(comment.post_id.into_inner())
            .bind(comment.user_id.into_inner())
            .bind(&comment.content)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_comment_insert_error(e, comment.post_id, comment.user_id))?;

            Ok(Comment::from(model))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_post_id(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        with_deadline(self.config.query_timeout, "comments.get_by_post_id", async {
            let results = sqlx::query_as::<_, CommentModel>(
                r"
                SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
                       u.username AS author_username
                FROM comments c
                JOIN users u ON u.id = c.user_id
                WHERE c.post_id = $1
                ORDER BY c.created_at DESC, c.id DESC
                ",
            )
            .bind(post_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

            Ok(results.into_iter().map(Comment::from).collect())
        })
        .await
    }
}
