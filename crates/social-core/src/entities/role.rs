//! Role entity - immutable reference data granting a permission level

/// Name of the role assigned when none is requested
pub const DEFAULT_ROLE: &str = "user";

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: crate::value_objects::Id,
    pub name: String,
    pub level: i32,
    pub description: String,
}

impl Role {
    /// Check if this role grants at least the given role's level
    #[inline]
    pub fn outranks_or_equals(&self, other: &Role) -> bool {
        self.level >= other.level
    }

    /// Check if this is the baseline role given to new accounts
    #[inline]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_ROLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Id;

    fn role(name: &str, level: i32) -> Role {
        Role {
            id: Id::new(i64::from(level)),
            name: name.to_string(),
            level,
            description: String::new(),
        }
    }

    #[test]
    fn test_role_ranking() {
        let user = role("user", 1);
        let admin = role("admin", 3);
        assert!(admin.outranks_or_equals(&user));
        assert!(admin.outranks_or_equals(&admin));
        assert!(!user.outranks_or_equals(&admin));
    }

    #[test]
    fn test_is_default() {
        assert!(role(DEFAULT_ROLE, 1).is_default());
        assert!(!role("moderator", 2).is_default());
    }
}
