//! Value objects - immutable types that represent domain concepts

mod feed_query;
mod id;
mod invitation_token;
mod tags;

pub use feed_query::{FeedQuery, MAX_FEED_LIMIT};
pub use id::{Id, IdParseError};
pub use invitation_token::{InvitationToken, TokenHash};
pub use tags::normalize_tags;
