//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub token_hash: String,
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
}
