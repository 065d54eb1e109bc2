mod common;

use common::{member_context, test_role, test_school, visitor_context};
use schoolhouse::access::DenyKind;
use schoolhouse::access::guard::{require_any_capability, require_capability, require_role_type};
use schoolhouse_core::Capability;
use schoolhouse_models::SystemRoleType;
use schoolhouse_models::roles::CapabilityFlags;

#[test]
fn test_teacher_flag_grants_academics_only() {
    let flags = CapabilityFlags {
        can_manage_academics: true,
        ..Default::default()
    };
    let ctx = member_context(SystemRoleType::Teacher, &[], flags);

    assert!(ctx.has_capability(Capability::ManageAcademics));
    assert!(!ctx.has_capability(Capability::ManageFinances));
}

#[test]
fn test_principal_wildcard_grants_everything() {
    let ctx = member_context(SystemRoleType::Principal, &["*"], CapabilityFlags::default());

    assert!(ctx.has_capability(Capability::ManageRoles));
    for capability in Capability::ALL {
        assert!(ctx.has_capability(capability));
    }
    // The wildcard also covers tokens outside the fixed vocabulary
    assert!(ctx.grants_token("some_future_capability"));
}

#[test]
fn test_super_admin_tag_grants_everything_with_empty_sources() {
    let ctx = member_context(
        SystemRoleType::SuperAdmin,
        &[],
        CapabilityFlags::default(),
    );
    for capability in Capability::ALL {
        assert!(ctx.has_capability(capability));
    }
}

#[test]
fn test_grant_is_or_of_token_and_flag_sources() {
    let flags = CapabilityFlags {
        can_view_reports: true,
        ..Default::default()
    };
    let ctx = member_context(SystemRoleType::HeadTeacher, &["communicate"], flags);

    for capability in Capability::ALL {
        let role = &ctx.membership.as_ref().unwrap().role;
        let by_token = role.permissions.iter().any(|p| p == capability.as_token());
        let by_flag = role.flags.allows(capability);
        assert_eq!(ctx.has_capability(capability), by_token || by_flag);
    }
}

#[test]
fn test_unknown_token_is_refused_even_with_all_flags() {
    let ctx = member_context(SystemRoleType::Principal, &[], CapabilityFlags::all());
    assert!(!ctx.grants_token("launch_rockets"));
}

#[test]
fn test_evaluation_is_idempotent() {
    let flags = CapabilityFlags {
        can_manage_students: true,
        ..Default::default()
    };
    let ctx = member_context(SystemRoleType::AdminStaff, &[], flags);

    let first = ctx.has_capability(Capability::ManageStudents);
    let second = ctx.has_capability(Capability::ManageStudents);
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn test_superuser_without_any_membership() {
    let ctx = visitor_context(true);
    assert!(ctx.has_capability(Capability::ManageStaff));
    assert!(require_capability(&ctx, Capability::ManageStaff).is_ok());
}

#[test]
fn test_no_membership_denies_with_no_membership_kind() {
    let ctx = visitor_context(false);

    assert!(!ctx.has_capability(Capability::ViewReports));

    let denied = require_capability(&ctx, Capability::ViewReports).unwrap_err();
    assert_eq!(denied.kind, DenyKind::NoMembership);
}

#[test]
fn test_legacy_admissions_token_reaches_students_flag() {
    let flags = CapabilityFlags {
        can_manage_students: true,
        ..Default::default()
    };
    let ctx = member_context(SystemRoleType::AdminStaff, &[], flags);
    assert!(ctx.grants_token("manage_admissions"));
}

#[test]
fn test_membership_in_one_school_grants_nothing_elsewhere() {
    // Same user, but the request resolved a school they have no role in.
    // The resolver keys memberships by (user, school), so the context for
    // the other school simply carries no membership.
    let home = member_context(SystemRoleType::Principal, &["*"], CapabilityFlags::default());
    let mut elsewhere = home.clone();
    elsewhere.school = test_school();
    elsewhere.membership = None;

    assert!(home.has_capability(Capability::ManageRoles));
    assert!(!elsewhere.has_capability(Capability::ManageRoles));
}

#[test]
fn test_role_record_does_not_leak_across_schools() {
    // Even holding a wildcard role object for school A, evaluation for a
    // context scoped to school B sees no grants unless B resolved its own
    // membership.
    let school_a = test_school();
    let role_in_a = test_role(
        school_a.id,
        SystemRoleType::Principal,
        &["*"],
        CapabilityFlags::default(),
    );
    assert!(role_in_a.grants(Capability::ManageRoles));

    let ctx_in_b = visitor_context(false);
    assert!(!ctx_in_b.has_capability(Capability::ManageRoles));
}

#[test]
fn test_require_any_capability_across_sources() {
    let flags = CapabilityFlags {
        can_manage_staff: true,
        ..Default::default()
    };
    let ctx = member_context(SystemRoleType::AdminStaff, &[], flags);

    assert!(
        require_any_capability(&ctx, &[Capability::ManageRoles, Capability::ManageStaff]).is_ok()
    );

    let denied =
        require_any_capability(&ctx, &[Capability::ManageRoles, Capability::ManageFinances])
            .unwrap_err();
    assert_eq!(denied.kind, DenyKind::MissingCapability);
}

#[test]
fn test_require_role_type_matches_tag() {
    let ctx = member_context(
        SystemRoleType::DepartmentHead,
        &[],
        CapabilityFlags::default(),
    );

    assert!(require_role_type(&ctx, &SystemRoleType::DepartmentHead).is_ok());

    let denied = require_role_type(&ctx, &SystemRoleType::Principal).unwrap_err();
    assert_eq!(denied.kind, DenyKind::RoleMismatch);
}

#[test]
fn test_capability_map_is_display_safe() {
    // Building the map calls the evaluator once per capability on top of
    // the enforcement call; nothing about the context changes.
    let ctx = member_context(SystemRoleType::Teacher, &["view_reports"], CapabilityFlags::default());

    let before = ctx.has_capability(Capability::ViewReports);
    let map = ctx.capability_map();
    let after = ctx.has_capability(Capability::ViewReports);

    assert_eq!(before, after);
    assert!(map["view_reports"]);
    assert!(!map["manage_finances"]);
}
