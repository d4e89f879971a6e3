//! # social-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `social-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations with per-call deadlines
//! - Scoped transactions for the user workflows
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_common::AppConfig;
//! use social_db::{create_pool, run_migrations, storage, RepositoryConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!
//!     let store = storage(pool, RepositoryConfig::from(&config.store));
//!     let feed = store.posts.get_user_feed(user_id, &FeedQuery::new()).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use social_core::Storage;

pub mod config;
pub mod deadline;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod transaction;

// Re-export commonly used types
pub use config::RepositoryConfig;
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgCommentRepository, PgFollowerRepository, PgPostRepository, PgRoleRepository,
    PgUserRepository, StorageErrorKind,
};
pub use transaction::with_transaction;

/// Build the full set of PostgreSQL repositories over one pool
pub fn storage(pool: PgPool, config: RepositoryConfig) -> Storage {
    Storage {
        posts: Arc::new(PgPostRepository::new(pool.clone(), config)),
        users: Arc::new(PgUserRepository::new(pool.clone(), config)),
        followers: Arc::new(PgFollowerRepository::new(pool.clone(), config)),
        comments: Arc::new(PgCommentRepository::new(pool.clone(), config)),
        roles: Arc::new(PgRoleRepository::new(pool, config)),
    }
}
