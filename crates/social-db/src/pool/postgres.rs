//! PostgreSQL connection pool management

use std::borrow::Cow;

use futures::future::BoxFuture;
use sqlx::error::BoxDynError;
use sqlx::migrate::{MigrateError, Migration, MigrationSource, MigrationType, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use social_common::DatabaseConfig;

/// Schema migrations compiled into the binary, in apply order
#[allow(clippy::unreadable_literal)]
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        20250101000001,
        "create roles",
        include_str!("../../migrations/20250101000001_create_roles.sql"),
    ),
    (
        20250101000002,
        "create users",
        include_str!("../../migrations/20250101000002_create_users.sql"),
    ),
    (
        20250101000003,
        "create posts",
        include_str!("../../migrations/20250101000003_create_posts.sql"),
    ),
    (
        20250101000004,
        "create followers",
        include_str!("../../migrations/20250101000004_create_followers.sql"),
    ),
];

/// Migration source backed by [`MIGRATIONS`], so binaries need no
/// `migrations/` directory at runtime
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedMigrations;

impl EmbeddedMigrations {
    fn migrations() -> Vec<Migration> {
        MIGRATIONS
            .iter()
            .map(|&(version, description, sql)| {
                Migration::new(
                    version,
                    Cow::Borrowed(description),
                    MigrationType::Simple,
                    Cow::Borrowed(sql),
                    false,
                )
            })
            .collect()
    }
}

impl MigrationSource<'static> for EmbeddedMigrations {
    fn resolve(self) -> BoxFuture<'static, Result<Vec<Migration>, BoxDynError>> {
        Box::pin(async { Ok(Self::migrations()) })
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "database pool ready"
    );

    Ok(pool)
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(EmbeddedMigrations).await?;
    migrator.run(pool).await?;
    info!(migrations = migrator.iter().count(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_sizing() {
        let config = DatabaseConfig::new("postgres://localhost/social");
        assert_eq!(config.max_connections, 30);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout(), std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_embedded_migrations_match_directory() {
        let embedded = EmbeddedMigrations::migrations();
        assert!(embedded.windows(2).all(|w| w[0].version < w[1].version));
        assert!(embedded.iter().all(|m| !m.sql.trim().is_empty()));

        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        let on_disk = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "sql"))
            .count();
        assert_eq!(embedded.len(), on_disk);
    }

    #[tokio::test]
    async fn test_embedded_migrator_resolves() {
        let migrator = Migrator::new(EmbeddedMigrations).await.unwrap();
        assert_eq!(migrator.iter().count(), MIGRATIONS.len());
    }
}
