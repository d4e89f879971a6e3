//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Every call runs under the deadline from [`RepositoryConfig`](crate::RepositoryConfig).

mod comment;
mod error;
mod feed;
mod follower;
mod post;
mod role;
mod user;

pub use comment::PgCommentRepository;
pub use error::{map_db_error, StorageErrorKind};
pub use follower::PgFollowerRepository;
pub use post::PgPostRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
