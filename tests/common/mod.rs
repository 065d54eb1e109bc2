use schoolhouse::access::{AccessContext, TransportHint};
use schoolhouse_models::ids::{MembershipId, RoleId, SchoolId, UserId};
use schoolhouse_models::roles::CapabilityFlags;
use schoolhouse_models::{Membership, MembershipWithRole, Role, School, SystemRoleType, User};

#[allow(dead_code)]
pub fn test_user(is_superuser: bool) -> User {
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

#[allow(dead_code)]
pub fn test_school() -> School {
    School {
        id: SchoolId::new(),
        name: "Hillcrest Academy".to_string(),
        address: None,
        is_active: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

#[allow(dead_code)]
pub fn test_role(
    school_id: SchoolId,
    system_role_type: SystemRoleType,
    permissions: &[&str],
    flags: CapabilityFlags,
) -> Role {
    Role {
        id: RoleId::new(),
        school_id: Some(school_id),
        name: "Test Role".to_string(),
        slug: "test_role".to_string(),
        description: None,
        system_role_type,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        flags,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

/// Context for a regular member holding the given role in the school.
#[allow(dead_code)]
pub fn member_context(role_type: SystemRoleType, permissions: &[&str], flags: CapabilityFlags) -> AccessContext {
    let user = test_user(false);
    let school = test_school();
    let role = test_role(school.id, role_type, permissions, flags);
    let membership = Membership {
        id: MembershipId::new(),
        user_id: user.id,
        school_id: school.id,
        role_id: role.id,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    AccessContext {
        user,
        school,
        membership: Some(MembershipWithRole::new(membership, role)),
        transport: TransportHint::Json,
    }
}

/// Context for a user with no membership in the resolved school.
#[allow(dead_code)]
pub fn visitor_context(is_superuser: bool) -> AccessContext {
    AccessContext {
        user: test_user(is_superuser),
        school: test_school(),
        membership: None,
        transport: TransportHint::Json,
    }
}
