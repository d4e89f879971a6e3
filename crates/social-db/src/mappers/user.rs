//! User entity <-> model mapper

use social_core::{Id, Role, User};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Id::new(model.id),
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            is_active: model.is_active,
            role: Role {
                id: Id::new(model.role_id),
                name: model.role_name,
                level: model.role_level,
                description: model.role_description,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use social_core::AccountState;

    #[test]
    fn test_user_from_model_carries_role() {
        let model = UserModel {
            id: 9,
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
            is_active: false,
            role_id: 2,
            role_name: "moderator".to_string(),
            role_level: 2,
            role_description: "mods".to_string(),
        };

        let user = User::from(model);
        assert_eq!(user.id, Id::new(9));
        assert_eq!(user.state(), AccountState::Pending);
        assert_eq!(user.role.name, "moderator");
        assert_eq!(user.role.level, 2);
    }
}
