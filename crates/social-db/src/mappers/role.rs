//! Role entity <-> model mapper

use social_core::{Id, Role};

use crate::models::RoleModel;

/// Convert RoleModel to Role entity
impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: Id::new(model.id),
            name: model.name,
            level: model.level,
            description: model.description,
        }
    }
}
