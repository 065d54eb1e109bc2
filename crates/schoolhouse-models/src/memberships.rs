//! Membership entities.
//!
//! A membership links exactly one user to exactly one school with exactly
//! one role. The `(user_id, school_id)` pair is unique, so a user holds at
//! most one role per school. Memberships belong to the school: removing a
//! user from a school deletes the membership, never the user.

use crate::ids::{MembershipId, RoleId, SchoolId, UserId};
use crate::roles::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user's role assignment within one school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub school_id: SchoolId,
    pub role_id: RoleId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A membership joined with its role, as the access pipeline consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MembershipWithRole {
    #[serde(flatten)]
    pub membership: Membership,
    pub role: Role,
}

impl MembershipWithRole {
    pub fn new(membership: Membership, role: Role) -> Self {
        Self { membership, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{CapabilityFlags, SystemRoleType};

    #[test]
    fn test_membership_with_role_flattens_membership() {
        let membership = Membership {
            id: MembershipId::new(),
            user_id: UserId::new(),
            school_id: SchoolId::new(),
            role_id: RoleId::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let role = Role {
            id: membership.role_id,
            school_id: Some(membership.school_id),
            name: "Teacher".to_string(),
            slug: "teacher".to_string(),
            description: None,
            system_role_type: SystemRoleType::Teacher,
            permissions: vec![],
            flags: CapabilityFlags::default(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let joined = MembershipWithRole::new(membership.clone(), role);
        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["user_id"], membership.user_id.to_string());
        assert_eq!(json["role"]["slug"], "teacher");
    }
}
