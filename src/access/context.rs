//! The per-request access context.
//!
//! [`AccessContext`] carries everything a permission decision needs (the
//! authenticated user, the school the request is acting in, and the user's
//! membership there if any) as an explicit value threaded through the
//! request, never as ambient state. Evaluation over a built context is
//! pure: no queries, no side effects, safe to call once for enforcement
//! and eight more times to render a capability map.

use std::collections::BTreeMap;

use schoolhouse_core::Capability;
use schoolhouse_models::{MembershipWithRole, School, SystemRoleType, User};

use crate::access::outcome::TransportHint;

/// Everything known about "who is doing what, where" for one request.
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub user: User,
    pub school: School,
    /// The user's membership in `school`, if they have one. Superusers
    /// commonly act without one.
    pub membership: Option<MembershipWithRole>,
    /// How denials should be rendered for this request.
    pub transport: TransportHint,
}

impl AccessContext {
    /// Whether this context grants a well-known capability.
    ///
    /// Superusers are granted everything before membership is even
    /// consulted; a missing membership grants nothing. Everything else
    /// delegates to the role's own grant logic.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.grants_token(capability.as_token())
    }

    /// Token form of [`Self::has_capability`], accepting legacy synonyms
    /// and out-of-vocabulary tokens.
    #[must_use]
    pub fn grants_token(&self, token: &str) -> bool {
        if self.user.is_superuser {
            return true;
        }
        match &self.membership {
            Some(membership) => membership.role.grants_token(token),
            None => false,
        }
    }

    /// Whether any one of `capabilities` is granted.
    #[must_use]
    pub fn has_any_capability(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|c| self.has_capability(*c))
    }

    /// The system role tag of the user's membership, if any.
    #[must_use]
    pub fn role_type(&self) -> Option<&SystemRoleType> {
        self.membership.as_ref().map(|m| &m.role.system_role_type)
    }

    /// Grant status for every capability in the vocabulary.
    ///
    /// Display-only helper for the dashboard and navigation; built from
    /// the same evaluation path as enforcement.
    #[must_use]
    pub fn capability_map(&self) -> BTreeMap<&'static str, bool> {
        Capability::ALL
            .iter()
            .map(|c| (c.as_token(), self.has_capability(*c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhouse_models::ids::{MembershipId, RoleId, SchoolId, UserId};
    use schoolhouse_models::roles::CapabilityFlags;
    use schoolhouse_models::{Membership, Role};

    fn test_user(is_superuser: bool) -> User {
        User {
            id: UserId::new(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            is_superuser,
            current_school_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn test_school() -> School {
        School {
            id: SchoolId::new(),
            name: "Test School".to_string(),
            address: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn membership_for(user: &User, school: &School, role_flags: CapabilityFlags) -> MembershipWithRole {
        let role = Role {
            id: RoleId::new(),
            school_id: Some(school.id),
            name: "Teacher".to_string(),
            slug: "teacher".to_string(),
            description: None,
            system_role_type: SystemRoleType::Teacher,
            permissions: vec![],
            flags: role_flags,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        MembershipWithRole::new(
            Membership {
                id: MembershipId::new(),
                user_id: user.id,
                school_id: school.id,
                role_id: role.id,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            role,
        )
    }

    #[test]
    fn test_superuser_bypasses_membership() {
        let ctx = AccessContext {
            user: test_user(true),
            school: test_school(),
            membership: None,
            transport: TransportHint::Json,
        };
        for capability in Capability::ALL {
            assert!(ctx.has_capability(capability));
        }
    }

    #[test]
    fn test_no_membership_grants_nothing() {
        let ctx = AccessContext {
            user: test_user(false),
            school: test_school(),
            membership: None,
            transport: TransportHint::Json,
        };
        for capability in Capability::ALL {
            assert!(!ctx.has_capability(capability));
        }
    }

    #[test]
    fn test_membership_delegates_to_role() {
        let user = test_user(false);
        let school = test_school();
        let flags = CapabilityFlags {
            can_manage_attendance: true,
            ..Default::default()
        };
        let membership = membership_for(&user, &school, flags);
        let ctx = AccessContext {
            user,
            school,
            membership: Some(membership),
            transport: TransportHint::Json,
        };
        assert!(ctx.has_capability(Capability::ManageAttendance));
        assert!(!ctx.has_capability(Capability::ManageFinances));
    }

    #[test]
    fn test_has_any_capability() {
        let user = test_user(false);
        let school = test_school();
        let flags = CapabilityFlags {
            can_manage_roles: true,
            ..Default::default()
        };
        let membership = membership_for(&user, &school, flags);
        let ctx = AccessContext {
            user,
            school,
            membership: Some(membership),
            transport: TransportHint::Json,
        };
        assert!(ctx.has_any_capability(&[Capability::ManageStaff, Capability::ManageRoles]));
        assert!(!ctx.has_any_capability(&[Capability::ManageStaff, Capability::ManageFinances]));
        assert!(!ctx.has_any_capability(&[]));
    }

    #[test]
    fn test_capability_map_matches_evaluation() {
        let user = test_user(false);
        let school = test_school();
        let flags = CapabilityFlags {
            can_view_reports: true,
            can_communicate: true,
            ..Default::default()
        };
        let membership = membership_for(&user, &school, flags);
        let ctx = AccessContext {
            user,
            school,
            membership: Some(membership),
            transport: TransportHint::Json,
        };

        let map = ctx.capability_map();
        assert_eq!(map.len(), Capability::ALL.len());
        for capability in Capability::ALL {
            assert_eq!(map[capability.as_token()], ctx.has_capability(capability));
        }
    }
}
