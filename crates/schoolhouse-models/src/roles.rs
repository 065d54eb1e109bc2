//! Role entities and the grant logic behind every permission decision.
//!
//! A role bundles two independent, additive sources of truth over the same
//! capability space:
//!
//! - `permissions`: a list of capability tokens, which may contain the
//!   [`WILDCARD`] token granting everything, and
//! - [`CapabilityFlags`]: one boolean column per well-known capability.
//!
//! A capability is granted if EITHER source grants it. Editing one source
//! never touches the other, so a role's effective grants can only change
//! through an explicit mutation of the source being edited.
//!
//! [`Role::grants_token`] is the single evaluation entry point; it is pure
//! and safe to call repeatedly, both for enforcement and for display logic
//! such as the dashboard capability map.

use crate::ids::{RoleId, SchoolId};
use schoolhouse_core::capabilities::{Capability, WILDCARD};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgTypeInfo;
use std::fmt;
use utoipa::ToSchema;

/// Well-known kinds of role, independent of custom naming.
///
/// The vocabulary is open-ended: unrecognized tags round-trip through
/// [`SystemRoleType::Custom`] untouched. Only [`SystemRoleType::SuperAdmin`]
/// carries special meaning to the evaluator: it grants every capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemRoleType {
    SuperAdmin,
    Principal,
    Teacher,
    AdminStaff,
    HeadTeacher,
    DepartmentHead,
    Custom(String),
}

impl SystemRoleType {
    /// Parse a stored tag. Never fails; unknown tags become [`Self::Custom`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "super_admin" => SystemRoleType::SuperAdmin,
            "principal" => SystemRoleType::Principal,
            "teacher" => SystemRoleType::Teacher,
            "admin_staff" => SystemRoleType::AdminStaff,
            "head_teacher" => SystemRoleType::HeadTeacher,
            "department_head" => SystemRoleType::DepartmentHead,
            other => SystemRoleType::Custom(other.to_string()),
        }
    }

    /// The stored string form of this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SystemRoleType::SuperAdmin => "super_admin",
            SystemRoleType::Principal => "principal",
            SystemRoleType::Teacher => "teacher",
            SystemRoleType::AdminStaff => "admin_staff",
            SystemRoleType::HeadTeacher => "head_teacher",
            SystemRoleType::DepartmentHead => "department_head",
            SystemRoleType::Custom(tag) => tag,
        }
    }

    /// Whether this tag short-circuits every capability check.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        matches!(self, SystemRoleType::SuperAdmin)
    }
}

impl fmt::Display for SystemRoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SystemRoleType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SystemRoleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

impl sqlx::Type<sqlx::Postgres> for SystemRoleType {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for SystemRoleType {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(
            &self.as_str().to_string(),
            buf,
        )
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SystemRoleType {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let tag = <String as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&tag))
    }
}

/// Per-capability boolean grant columns.
///
/// The token-to-column mapping in [`CapabilityFlags::allows`] is an
/// exhaustive `match` over [`Capability`], so adding a capability without
/// deciding its column is a compile error. Unknown request tokens never
/// reach a flag; they can only be granted literally or via the wildcard.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema,
)]
#[serde(default)]
pub struct CapabilityFlags {
    pub can_manage_academics: bool,
    pub can_manage_students: bool,
    pub can_manage_staff: bool,
    pub can_manage_roles: bool,
    pub can_manage_finances: bool,
    pub can_view_reports: bool,
    pub can_communicate: bool,
    pub can_manage_attendance: bool,
}

impl CapabilityFlags {
    /// Whether the flag column mapped to `capability` is set.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageAcademics => self.can_manage_academics,
            Capability::ManageStudents => self.can_manage_students,
            Capability::ManageStaff => self.can_manage_staff,
            Capability::ManageRoles => self.can_manage_roles,
            Capability::ManageFinances => self.can_manage_finances,
            Capability::ViewReports => self.can_view_reports,
            Capability::Communicate => self.can_communicate,
            Capability::ManageAttendance => self.can_manage_attendance,
        }
    }

    /// All flags set. Used when seeding principal-level roles.
    #[must_use]
    pub fn all() -> Self {
        Self {
            can_manage_academics: true,
            can_manage_students: true,
            can_manage_staff: true,
            can_manage_roles: true,
            can_manage_finances: true,
            can_view_reports: true,
            can_communicate: true,
            can_manage_attendance: true,
        }
    }
}

/// A named bundle of capabilities.
///
/// Roles belong to a school, or are system-wide when `school_id` is null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub school_id: Option<SchoolId>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub system_role_type: SystemRoleType,
    /// Capability tokens; may contain the `*` wildcard.
    pub permissions: Vec<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub flags: CapabilityFlags,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Role {
    /// Whether this role grants a well-known capability.
    #[must_use]
    pub fn grants(&self, capability: Capability) -> bool {
        self.grants_token(capability.as_token())
    }

    /// Whether this role grants the capability named by `token`.
    ///
    /// Checked in order, short-circuiting on the first grant:
    ///
    /// 1. a `super_admin` role grants everything;
    /// 2. the `*` wildcard in `permissions` grants everything;
    /// 3. a literal token match in `permissions` (the legacy
    ///    `manage_admissions` synonym is canonicalized first, and the raw
    ///    token is also honored so stored legacy grants keep working);
    /// 4. the boolean flag column mapped to the token.
    ///
    /// Tokens outside the vocabulary have no flag column and are refused
    /// unless granted literally or by wildcard.
    #[must_use]
    pub fn grants_token(&self, token: &str) -> bool {
        if self.system_role_type.is_super_admin() {
            return true;
        }
        if self.permissions.iter().any(|p| p == WILDCARD) {
            return true;
        }
        let canonical = Capability::canonical_token(token);
        if self.permissions.iter().any(|p| p == canonical || p == token) {
            return true;
        }
        match Capability::from_token(token) {
            Some(capability) => self.flags.allows(capability),
            None => false,
        }
    }
}

/// Generate a slug from a role name.
///
/// Converts to lowercase, replaces spaces and hyphens with underscores,
/// replaces invalid characters, and collapses runs of underscores.
pub fn generate_slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c == ' ' || c == '-' {
                '_'
            } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut result = String::new();
    let mut prev_underscore = false;
    for c in slug.chars() {
        if c == '_' {
            if !prev_underscore && !result.is_empty() {
                result.push(c);
            }
            prev_underscore = true;
        } else {
            result.push(c);
            prev_underscore = false;
        }
    }

    result.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_with(
        system_role_type: SystemRoleType,
        permissions: Vec<&str>,
        flags: CapabilityFlags,
    ) -> Role {
        Role {
            id: RoleId::new(),
            school_id: Some(SchoolId::new()),
            name: "Test Role".to_string(),
            slug: "test_role".to_string(),
            description: None,
            system_role_type,
            permissions: permissions.into_iter().map(String::from).collect(),
            flags,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_super_admin_grants_everything() {
        let role = role_with(SystemRoleType::SuperAdmin, vec![], CapabilityFlags::default());
        for capability in Capability::ALL {
            assert!(role.grants(capability));
        }
        assert!(role.grants_token("anything_at_all"));
    }

    #[test]
    fn test_wildcard_grants_everything() {
        let role = role_with(
            SystemRoleType::Principal,
            vec!["*"],
            CapabilityFlags::default(),
        );
        for capability in Capability::ALL {
            assert!(role.grants(capability));
        }
        // Including tokens outside the fixed vocabulary
        assert!(role.grants_token("not_a_real_capability"));
    }

    #[test]
    fn test_flag_only_grant() {
        let flags = CapabilityFlags {
            can_manage_academics: true,
            ..Default::default()
        };
        let role = role_with(SystemRoleType::Teacher, vec![], flags);
        assert!(role.grants(Capability::ManageAcademics));
        assert!(!role.grants(Capability::ManageFinances));
    }

    #[test]
    fn test_token_only_grant() {
        let role = role_with(
            SystemRoleType::AdminStaff,
            vec!["manage_finances"],
            CapabilityFlags::default(),
        );
        assert!(role.grants(Capability::ManageFinances));
        assert!(!role.grants(Capability::ManageStaff));
    }

    #[test]
    fn test_sources_are_additive() {
        let flags = CapabilityFlags {
            can_view_reports: true,
            ..Default::default()
        };
        let role = role_with(SystemRoleType::HeadTeacher, vec!["communicate"], flags);
        for capability in Capability::ALL {
            let by_token = role
                .permissions
                .iter()
                .any(|p| p == capability.as_token());
            let by_flag = role.flags.allows(capability);
            assert_eq!(role.grants(capability), by_token || by_flag);
        }
    }

    #[test]
    fn test_unknown_token_refused_despite_flags() {
        let role = role_with(SystemRoleType::Principal, vec![], CapabilityFlags::all());
        assert!(!role.grants_token("launch_rockets"));
    }

    #[test]
    fn test_legacy_admissions_token() {
        // Flag grant through the synonym
        let flags = CapabilityFlags {
            can_manage_students: true,
            ..Default::default()
        };
        let role = role_with(SystemRoleType::AdminStaff, vec![], flags);
        assert!(role.grants_token("manage_admissions"));

        // Stored legacy token grants the canonical request
        let role = role_with(
            SystemRoleType::AdminStaff,
            vec!["manage_admissions"],
            CapabilityFlags::default(),
        );
        assert!(role.grants_token("manage_admissions"));
        assert!(role.grants(Capability::ManageStudents));
    }

    #[test]
    fn test_grants_is_idempotent() {
        let role = role_with(
            SystemRoleType::Teacher,
            vec!["view_reports"],
            CapabilityFlags::default(),
        );
        assert_eq!(
            role.grants(Capability::ViewReports),
            role.grants(Capability::ViewReports)
        );
    }

    #[test]
    fn test_system_role_type_round_trip() {
        for tag in [
            "super_admin",
            "principal",
            "teacher",
            "admin_staff",
            "head_teacher",
            "department_head",
        ] {
            assert_eq!(SystemRoleType::parse(tag).as_str(), tag);
        }
        let custom = SystemRoleType::parse("bursar");
        assert_eq!(custom, SystemRoleType::Custom("bursar".to_string()));
        assert_eq!(custom.as_str(), "bursar");
        assert!(!custom.is_super_admin());
    }

    #[test]
    fn test_system_role_type_serde() {
        let json = serde_json::to_string(&SystemRoleType::HeadTeacher).unwrap();
        assert_eq!(json, r#""head_teacher""#);
        let parsed: SystemRoleType = serde_json::from_str(r#""bursar""#).unwrap();
        assert_eq!(parsed, SystemRoleType::Custom("bursar".to_string()));
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Head Teacher"), "head_teacher");
        assert_eq!(generate_slug("My-Role"), "my_role");
        assert_eq!(generate_slug("Role  Name"), "role_name");
        assert_eq!(generate_slug("Role123"), "role123");
    }
}
