//! User entity - represents an account on the social network

use chrono::{DateTime, Utc};
use std::fmt;

use crate::entities::role::{Role, DEFAULT_ROLE};
use crate::value_objects::Id;

/// Lifecycle state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    /// Registered but not yet activated through an invitation
    Pending,
    /// Activated; visible to normal lookups
    Active,
}

/// User entity
///
/// `Debug` redacts the password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub role: Role,
}

impl User {
    /// Current lifecycle state
    pub fn state(&self) -> AccountState {
        if self.is_active {
            AccountState::Active
        } else {
            AccountState::Pending
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<REDACTED>")
            .field("created_at", &self.created_at)
            .field("is_active", &self.is_active)
            .field("role", &self.role.name)
            .finish()
    }
}

/// Values needed to register a new account
///
/// The password must already be hashed by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Role name; `None` selects the baseline role
    pub role: Option<String>,
}

impl NewUser {
    /// Create a registration with the baseline role
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            role: None,
        }
    }

    /// Request a specific role by name
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Role name to resolve at insert time
    pub fn role_name(&self) -> &str {
        match self.role.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_ROLE,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(is_active: bool) -> User {
        User {
            id: Id::new(1),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            is_active,
            role: Role {
                id: Id::new(1),
                name: "user".to_string(),
                level: 1,
                description: String::new(),
            },
        }
    }

    #[test]
    fn test_state() {
        assert_eq!(sample_user(false).state(), AccountState::Pending);
        assert_eq!(sample_user(true).state(), AccountState::Active);
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let debug = format!("{:?}", sample_user(true));
        assert!(!debug.contains("$argon2id$secret"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn test_role_name_defaults() {
        let new_user = NewUser::new(
            "bob".to_string(),
            "bob@example.com".to_string(),
            "hash".to_string(),
        );
        assert_eq!(new_user.role_name(), DEFAULT_ROLE);
        assert_eq!(new_user.clone().with_role("  ").role_name(), DEFAULT_ROLE);
        assert_eq!(new_user.with_role("admin").role_name(), "admin");
    }
}
