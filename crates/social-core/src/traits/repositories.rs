//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Each operation fails with one of the
//! [`DomainError`] kinds; no implementation retries on its own.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{
    Comment, FeedItem, Follower, NewComment, NewPost, NewUser, Post, Role, User,
};
use crate::error::DomainError;
use crate::value_objects::{FeedQuery, Id, InvitationToken};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post; returns it with identity, timestamps and the
    /// initial version
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Find a post by ID (comments are left empty)
    async fn get_by_id(&self, id: Id) -> RepoResult<Post>;

    /// Write title, content and tags if `post.version` is still current
    ///
    /// Returns the stored post carrying the incremented version, or
    /// [`DomainError::VersionConflict`] when the version is stale.
    async fn update(&self, post: &Post) -> RepoResult<Post>;

    /// Hard delete a post
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Posts by the user and by everyone the user follows, newest first
    async fn get_user_feed(&self, user_id: Id, query: &FeedQuery) -> RepoResult<Vec<FeedItem>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by ID
    async fn get_by_id(&self, id: Id) -> RepoResult<User>;

    /// Find an active user by email
    async fn get_by_email(&self, email: &str) -> RepoResult<User>;

    /// Insert a pending (inactive) user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Insert a pending user together with an invitation valid for `ttl`
    async fn create_and_invite(
        &self,
        user: &NewUser,
        token: &InvitationToken,
        ttl: Duration,
    ) -> RepoResult<User>;

    /// Redeem an invitation: activate its user and consume every
    /// invitation that user holds
    async fn activate(&self, token: &InvitationToken) -> RepoResult<User>;

    /// Delete a user together with any outstanding invitations
    async fn delete(&self, id: Id) -> RepoResult<()>;
}

// ============================================================================
// Follower Repository
// ============================================================================

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait FollowerRepository: Send + Sync {
    /// Make `follower_id` follow `user_id`
    async fn follow(&self, follower_id: Id, user_id: Id) -> RepoResult<Follower>;

    /// Remove the edge if present; removing a missing edge succeeds
    async fn unfollow(&self, follower_id: Id, user_id: Id) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Append a comment to a post
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// All comments on a post with author identity, newest first
    async fn get_by_post_id(&self, post_id: Id) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find a role by its unique name
    async fn get_by_name(&self, name: &str) -> RepoResult<Role>;
}

// ============================================================================
// Storage
// ============================================================================

/// One handle per repository, shared by every request
#[derive(Clone)]
pub struct Storage {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub followers: Arc<dyn FollowerRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub roles: Arc<dyn RoleRepository>,
}
