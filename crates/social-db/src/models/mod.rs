//! Database models - SQLx-compatible structs for PostgreSQL tables and joins

mod comment;
mod follower;
mod invitation;
mod post;
mod role;
mod user;

pub use comment::CommentModel;
pub use follower::FollowerModel;
pub use invitation::InvitationModel;
pub use post::{FeedItemModel, PostModel};
pub use role::RoleModel;
pub use user::UserModel;
