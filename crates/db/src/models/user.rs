//! User entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mixdesk_core::types::{DbId, Timestamp};

/// A row from the `users` table. Never serialized to clients as-is
/// (contains the password hash); use [`Profile`] for public projections.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a user: what other users and the client SDK see.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Profile {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a user row.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
}
