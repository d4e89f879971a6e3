//! Error handling utilities for repositories
//!
//! Storage failures are classified from SQLSTATE codes and constraint names
//! reported by PostgreSQL, never from message text. Anything without a
//! stable signal is forwarded as [`DomainError::DatabaseError`].

use sqlx::Error as SqlxError;

use social_core::{DomainError, Id};

/// SQLSTATE `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE `foreign_key_violation`
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const USER_INVITATIONS_PKEY: &str = "user_invitations_pkey";
pub const FOLLOWERS_PKEY: &str = "followers_pkey";
pub const FOLLOWERS_USER_FKEY: &str = "followers_user_id_fkey";
pub const FOLLOWERS_FOLLOWER_FKEY: &str = "followers_follower_id_fkey";
pub const COMMENTS_POST_FKEY: &str = "comments_post_id_fkey";
pub const COMMENTS_USER_FKEY: &str = "comments_user_id_fkey";

/// Storage-engine failure reduced to what the domain can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorKind {
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
    RowNotFound,
    Other,
}

impl StorageErrorKind {
    /// Classify from a SQLSTATE code and the violated constraint, if any
    pub fn from_code(code: Option<&str>, constraint: Option<&str>) -> Self {
        let constraint = constraint.map(str::to_string);
        match code {
            Some(UNIQUE_VIOLATION) => Self::UniqueViolation { constraint },
            Some(FOREIGN_KEY_VIOLATION) => Self::ForeignKeyViolation { constraint },
            _ => Self::Other,
        }
    }

    /// Classify an SQLx error
    pub fn classify(e: &SqlxError) -> Self {
        match e {
            SqlxError::RowNotFound => Self::RowNotFound,
            SqlxError::Database(db_err) => {
                Self::from_code(db_err.code().as_deref(), db_err.constraint())
            }
            _ => Self::Other,
        }
    }

    /// Name of the violated constraint, if the engine reported one
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation { constraint } | Self::ForeignKeyViolation { constraint } => {
                constraint.as_deref()
            }
            Self::RowNotFound | Self::Other => None,
        }
    }
}

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Classify a failed user insert
pub fn map_user_insert_error(e: SqlxError) -> DomainError {
    match StorageErrorKind::classify(&e) {
        StorageErrorKind::UniqueViolation { constraint } => match constraint.as_deref() {
            Some(USERS_EMAIL_KEY) => DomainError::DuplicateEmail,
            Some(USERS_USERNAME_KEY) => DomainError::DuplicateUsername,
            _ => map_db_error(e),
        },
        _ => map_db_error(e),
    }
}

/// Classify a failed invitation insert
pub fn map_invitation_insert_error(e: SqlxError) -> DomainError {
    match StorageErrorKind::classify(&e) {
        StorageErrorKind::UniqueViolation { constraint }
            if constraint.as_deref() == Some(USER_INVITATIONS_PKEY) =>
        {
            DomainError::DuplicateInvitation
        }
        _ => map_db_error(e),
    }
}

/// Classify a failed follow insert
pub fn map_follow_error(e: SqlxError, follower_id: Id, user_id: Id) -> DomainError {
    let kind = StorageErrorKind::classify(&e);
    match (&kind, kind.constraint()) {
        (StorageErrorKind::UniqueViolation { .. }, Some(FOLLOWERS_PKEY) | None) => {
            DomainError::AlreadyFollowing
        }
        (StorageErrorKind::ForeignKeyViolation { .. }, Some(FOLLOWERS_FOLLOWER_FKEY)) => {
            user_not_found(follower_id)
        }
        (StorageErrorKind::ForeignKeyViolation { .. }, Some(FOLLOWERS_USER_FKEY) | None) => {
            user_not_found(user_id)
        }
        _ => map_db_error(e),
    }
}

/// Classify a failed comment insert
pub fn map_comment_insert_error(e: SqlxError, post_id: Id, user_id: Id) -> DomainError {
    let kind = StorageErrorKind::classify(&e);
    match (&kind, kind.constraint()) {
        (StorageErrorKind::ForeignKeyViolation { .. }, Some(COMMENTS_POST_FKEY)) => {
            post_not_found(post_id)
        }
        (StorageErrorKind::ForeignKeyViolation { .. }, Some(COMMENTS_USER_FKEY)) => {
            user_not_found(user_id)
        }
        _ => map_db_error(e),
    }
}

/// Map an author foreign key violation to the missing user
pub fn map_author_fk_error(e: SqlxError, user_id: Id) -> DomainError {
    match StorageErrorKind::classify(&e) {
        StorageErrorKind::ForeignKeyViolation { .. } => user_not_found(user_id),
        _ => map_db_error(e),
    }
}

/// Create a "user not found" error
pub fn user_not_found(id: Id) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: Id) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "role not found" error
pub fn role_not_found(name: &str) -> DomainError {
    DomainError::RoleNotFound(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_unique() {
        let kind = StorageErrorKind::from_code(Some("23505"), Some(USERS_EMAIL_KEY));
        assert_eq!(
            kind,
            StorageErrorKind::UniqueViolation {
                constraint: Some(USERS_EMAIL_KEY.to_string())
            }
        );
        assert_eq!(kind.constraint(), Some(USERS_EMAIL_KEY));
    }

    #[test]
    fn test_from_code_foreign_key() {
        let kind = StorageErrorKind::from_code(Some("23503"), Some(COMMENTS_POST_FKEY));
        assert!(matches!(kind, StorageErrorKind::ForeignKeyViolation { .. }));
        assert_eq!(kind.constraint(), Some(COMMENTS_POST_FKEY));
    }

    #[test]
    fn test_from_code_other() {
        assert_eq!(
            StorageErrorKind::from_code(Some("40001"), None),
            StorageErrorKind::Other
        );
        assert_eq!(StorageErrorKind::from_code(None, None), StorageErrorKind::Other);
    }

    #[test]
    fn test_classify_row_not_found() {
        assert_eq!(
            StorageErrorKind::classify(&SqlxError::RowNotFound),
            StorageErrorKind::RowNotFound
        );
    }

    #[test]
    fn test_unclassified_errors_pass_through() {
        let err = map_user_insert_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, DomainError::DatabaseError(_)));

        let err = map_invitation_insert_error(SqlxError::RowNotFound);
        assert!(matches!(err, DomainError::DatabaseError(_)));

        let err = map_follow_error(SqlxError::PoolClosed, Id::new(1), Id::new(2));
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
