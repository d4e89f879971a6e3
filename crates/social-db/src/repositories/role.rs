//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{RepoResult, RoleRepository};
use social_core::Role;

use crate::config::RepositoryConfig;
use crate::deadline::with_deadline;
use crate::models::RoleModel;

use super::error::{map_db_error, role_not_found};

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
    config: RepositoryConfig,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> RepoResult<Role> {
        with_deadline(self.config.query_timeout, "roles.get_by_name", async {
            let result = sqlx::query_as::<_, RoleModel>(
                r"
                SELECT id, name, level, description
                FROM roles
                WHERE name = $1
                ",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            result.map(Role::from).ok_or_else(|| role_not_found(name))
        })
        .await
    }
}
