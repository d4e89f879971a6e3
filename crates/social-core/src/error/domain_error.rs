//! Domain errors - error types for the domain layer

use std::time::Duration;

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Id),

    #[error("No active user with that email")]
    UserEmailNotFound,

    #[error("Post not found: {0}")]
    PostNotFound(Id),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Invitation not found")]
    InvitationNotFound,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Post {id} was modified concurrently (expected version {expected})")]
    VersionConflict { id: Id, expected: i64 },

    #[error("A user with that email already exists")]
    DuplicateEmail,

    #[error("A user with that username already exists")]
    DuplicateUsername,

    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("An invitation with that token already exists")]
    DuplicateInvitation,

    // =========================================================================
    // Expiry
    // =========================================================================
    #[error("Invitation has expired")]
    InvitationExpired,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for callers that report errors
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UserEmailNotFound => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::InvitationNotFound => "UNKNOWN_INVITATION",

            // Conflict
            Self::VersionConflict { .. } => "VERSION_CONFLICT",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::DuplicateInvitation => "DUPLICATE_INVITATION",

            Self::InvitationExpired => "INVITATION_EXPIRED",

            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::Timeout(_) => "TIMEOUT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UserEmailNotFound
                | Self::PostNotFound(_)
                | Self::RoleNotFound(_)
                | Self::InvitationNotFound
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::VersionConflict { .. }
                | Self::DuplicateEmail
                | Self::DuplicateUsername
                | Self::AlreadyFollowing
                | Self::DuplicateInvitation
        )
    }

    /// Check if the invitation token was unknown or past its expiry
    pub fn is_invalid_invitation(&self) -> bool {
        matches!(self, Self::InvitationNotFound | Self::InvitationExpired)
    }

    /// Check if the operation exceeded its deadline
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this is a validation error
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
