//! Repository traits (ports)

mod repositories;

#[cfg(any(test, feature = "mocks"))]
pub use repositories::{
    MockCommentRepository, MockFollowerRepository, MockPostRepository, MockRoleRepository,
    MockUserRepository,
};
pub use repositories::{
    CommentRepository, FollowerRepository, PostRepository, RepoResult, RoleRepository, Storage,
    UserRepository,
};
