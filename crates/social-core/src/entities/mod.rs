//! Domain entities - core business objects

mod comment;
mod follower;
mod invitation;
mod post;
mod role;
mod user;

pub use comment::{Comment, CommentAuthor, NewComment};
pub use follower::Follower;
pub use invitation::Invitation;
pub use post::{FeedItem, NewPost, Post, INITIAL_VERSION};
pub use role::{Role, DEFAULT_ROLE};
pub use user::{AccountState, NewUser, User};
