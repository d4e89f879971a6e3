//! Invitation entity <-> model mapper

use social_core::{Id, Invitation, TokenHash};

use crate::models::InvitationModel;

/// Convert InvitationModel to Invitation entity
impl From<InvitationModel> for Invitation {
    fn from(model: InvitationModel) -> Self {
        Invitation {
            token_hash: TokenHash::from_stored(model.token_hash),
            user_id: Id::new(model.user_id),
            expiry: model.expiry,
        }
    }
}
