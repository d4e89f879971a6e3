//! # social-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! the domain error taxonomy. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod retry;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AccountState, Comment, CommentAuthor, FeedItem, Follower, Invitation, NewComment, NewPost,
    NewUser, Post, Role, User, DEFAULT_ROLE, INITIAL_VERSION,
};
pub use error::DomainError;
pub use retry::retry_on_conflict;
pub use traits::{
    CommentRepository, FollowerRepository, PostRepository, RepoResult, RoleRepository, Storage,
    UserRepository,
};
pub use value_objects::{
    normalize_tags, FeedQuery, Id, IdParseError, InvitationToken, TokenHash, MAX_FEED_LIMIT,
};
