//! User entities.
//!
//! A user is an authenticated principal. Users are global, owned by no
//! school, and connect to schools only through memberships.
//! The `is_superuser` flag marks operator accounts that bypass every
//! school-scoped permission check; `current_school_id` remembers which
//! school the user last selected so the next request can resolve a school
//! without an explicit hint.

use crate::ids::{SchoolId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An authenticated user account.
///
/// The password hash is stored in the same table but deliberately not on
/// this struct; credential checks load it separately in the auth module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_superuser: bool,
    pub current_school_id: Option<SchoolId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization() {
        let user = User {
            id: UserId::new(),
            first_name: "Amina".to_string(),
            last_name: "Bello".to_string(),
            email: "amina@example.com".to_string(),
            is_superuser: false,
            current_school_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("amina@example.com"));
        assert!(serialized.contains("\"is_superuser\":false"));
    }
}
