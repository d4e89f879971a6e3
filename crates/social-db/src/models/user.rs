//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a users row joined with its role
///
/// Every user query selects the role columns under the `role_` prefix.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub role_id: i64,
    pub role_name: String,
    pub role_level: i32,
    pub role_description: String,
}
