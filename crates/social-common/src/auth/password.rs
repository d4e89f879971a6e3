//! Password hashing and verification utilities
//!
//! Uses Argon2id for password hashing. The store only ever receives the
//! PHC-formatted hash string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use social_core::{DomainError, NewUser};

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::InternalError(format!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the stored hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| DomainError::InternalError(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password strength
///
/// Requires at least 8 characters with an uppercase letter, a lowercase
/// letter and a digit.
///
/// # Errors
/// Returns a validation error naming the first unmet requirement
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let requirement = if password.chars().count() < 8 {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(char::is_uppercase) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(char::is_lowercase) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one digit")
    } else {
        None
    };

    match requirement {
        Some(msg) => Err(DomainError::ValidationError(msg.to_string())),
        None => Ok(()),
    }
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        verify_password(password, hash)
    }

    /// Check strength and hash a plaintext password into a registration
    ///
    /// # Errors
    /// Returns a validation error for weak passwords, or an internal error
    /// if hashing fails
    pub fn new_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<NewUser, DomainError> {
        validate_password_strength(password)?;
        let password_hash = self.hash(password)?;
        Ok(NewUser::new(
            username.to_string(),
            email.to_string(),
            password_hash,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2"));
        // Different salt each time
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("SecurePassword123!").unwrap();

        assert!(verify_password("SecurePassword123!", &hash).unwrap());
        assert!(!verify_password("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let err = verify_password("whatever", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, DomainError::InternalError(_)));
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("SecurePass1").is_ok());
        assert!(validate_password_strength("MyP@ssw0rd!").is_ok());

        for (weak, expected) in [
            ("Short1", "8 characters"),
            ("lowercase123", "uppercase"),
            ("UPPERCASE123", "lowercase"),
            ("NoDigitsHere", "digit"),
        ] {
            match validate_password_strength(weak) {
                Err(DomainError::ValidationError(msg)) => assert!(msg.contains(expected)),
                other => panic!("expected validation error for {weak}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_new_user_hashes_password() {
        let service = PasswordService::new();
        let new_user = service
            .new_user("alice", "alice@example.com", "SecurePass1")
            .unwrap();

        assert_eq!(new_user.username, "alice");
        assert_ne!(new_user.password_hash, "SecurePass1");
        assert!(service.verify("SecurePass1", &new_user.password_hash).unwrap());
        assert_eq!(new_user.role_name(), social_core::DEFAULT_ROLE);
    }

    #[test]
    fn test_new_user_rejects_weak_password() {
        let err = PasswordService::new()
            .new_user("alice", "alice@example.com", "weak")
            .unwrap_err();
        assert!(err.is_validation());
    }
}
