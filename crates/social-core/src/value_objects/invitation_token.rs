//! Invitation tokens - one-time activation credentials
//!
//! The raw token is handed to the invitee (usually by mail) and never
//! persisted. The store only ever sees the SHA-256 digest, hex encoded.

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes in a generated token
const TOKEN_BYTES: usize = 32;

/// SHA-256 digest of an invitation token (64-character hex string)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// Hash a raw token
    pub fn from_token(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Rehydrate a digest read back from storage
    pub fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw invitation token
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct InvitationToken(String);

impl InvitationToken {
    /// Wrap a token received from the invitee
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a fresh random token
    pub fn generate() -> Self {
        use rand::Rng;

        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Hash the token for storage or lookup
    pub fn hash(&self) -> TokenHash {
        TokenHash::from_token(&self.0)
    }

    /// Expose the raw token, e.g. to build an activation link
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InvitationToken")
            .field(&"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_sha256() {
        let token = InvitationToken::new("abc123");
        assert_eq!(token.hash(), token.hash());
        assert_eq!(
            token.hash().as_str(),
            "6ca13d52ca70c883e0f0bb101e425a89e8624de51db2d2392593af6a84118090"
        );
    }

    #[test]
    fn test_hash_differs_from_token() {
        let token = InvitationToken::new("abc123");
        assert_ne!(token.hash().as_str(), token.expose());
        assert_eq!(token.hash().as_str().len(), 64);
    }

    #[test]
    fn test_generate_is_random_hex() {
        let a = InvitationToken::generate();
        let b = InvitationToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.expose().len(), TOKEN_BYTES * 2);
        assert!(a.expose().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = InvitationToken::new("super-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
