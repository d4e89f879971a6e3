//! Follower entity <-> model mapper

use social_core::{Follower, Id};

use crate::models::FollowerModel;

impl From<FollowerModel> for Follower {
    fn from(model: FollowerModel) -> Self {
        Follower {
            user_id: Id::new(model.user_id),
            follower_id: Id::new(model.follower_id),
            created_at: model.created_at,
        }
    }
}
