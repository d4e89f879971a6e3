//! Invitation entity - a pending account's activation credential

use chrono::{DateTime, Utc};

use crate::value_objects::{Id, TokenHash};

/// Stored invitation, keyed by the hash of its token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub token_hash: TokenHash,
    pub user_id: Id,
    pub expiry: DateTime<Utc>,
}

impl Invitation {
    /// Check if the invitation can no longer be redeemed at `now`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}
