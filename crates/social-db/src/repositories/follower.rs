//! PostgreSQL implementation of FollowerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{FollowerRepository, RepoResult};
use social_core::{DomainError, Follower, Id};

use crate::config::RepositoryConfig;
use crate::deadline::with_deadline;
use crate::models::FollowerModel;

use super::error::{map_db_error, map_follow_error};

/// PostgreSQL implementation of FollowerRepository
#[derive(Clone)]
pub struct PgFollowerRepository {
    pool: PgPool,
    config: RepositoryConfig,
}

impl PgFollowerRepository {
    /// Create a new PgFollowerRepository
    pub fn new(pool: PgPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl FollowerRepository for PgFollowerRepository {
    #[instrument(skip(self))]
    async fn follow(&self, follower_id: Id, user_id: Id) -> RepoResult<Follower> {
        if follower_id == user_id {
            return Err(DomainError::ValidationError(
                "Users cannot follow themselves".to_string(),
            ));
        }

        with_deadline(self.config.query_timeout, "followers.follow", async {
            let model = sqlx::query_as::<_, FollowerModel>(
                r"
                INSERT INTO followers (user_id, follower_id)
                VALUES ($1, $2)
                RETURNING user_id, follower_id, created_at
                ",
            )
            .bind(user_id.into_inner())
            .bind(follower_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_follow_error(e, follower_id, user_id))?;

            Ok(Follower::from(model))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn unfollow(&self, follower_id: Id, user_id: Id) -> RepoResult<()> {
        with_deadline(self.config.query_timeout, "followers.unfollow", async {
            sqlx::query("DELETE FROM followers WHERE user_id = $1 AND follower_id = $2")
                .bind(user_id.into_inner())
                .bind(follower_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

            Ok(())
        })
        .await
    }
}
