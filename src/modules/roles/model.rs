use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::Role;
use schoolhouse_models::roles::CapabilityFlags;

/// DTO for creating a school-scoped role.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    /// System tag for the role (e.g. `teacher`, `head_teacher`).
    /// Defaults to `admin_staff` when omitted; `super_admin` is reserved
    /// for system-wide roles and rejected here.
    pub system_role_type: Option<String>,
    /// Initial permission tokens.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Initial capability flags. Unnamed flags default to off.
    #[serde(default)]
    pub flags: CapabilityFlags,
}

/// DTO for granting permission tokens to a role.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GrantPermissionsDto {
    #[validate(length(min = 1, message = "At least one permission token is required"))]
    pub permissions: Vec<String>,
}

/// DTO for setting named capability flags on a role.
///
/// Only flags named in the request change; omitted flags keep their
/// current value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFlagsDto {
    pub can_manage_academics: Option<bool>,
    pub can_manage_students: Option<bool>,
    pub can_manage_staff: Option<bool>,
    pub can_manage_roles: Option<bool>,
    pub can_manage_finances: Option<bool>,
    pub can_view_reports: Option<bool>,
    pub can_communicate: Option<bool>,
    pub can_manage_attendance: Option<bool>,
}

/// Query parameters for listing roles.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing roles.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedRolesResponse {
    pub data: Vec<Role>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_role_dto_validation() {
        let valid = CreateRoleDto {
            name: "Form Teacher".to_string(),
            description: Some("Runs a form class".to_string()),
            system_role_type: Some("teacher".to_string()),
            permissions: vec![],
            flags: CapabilityFlags::default(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateRoleDto {
            name: "".to_string(),
            description: None,
            system_role_type: None,
            permissions: vec![],
            flags: CapabilityFlags::default(),
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_create_role_dto_defaults() {
        let dto: CreateRoleDto = serde_json::from_str(r#"{"name":"Bursar"}"#).unwrap();
        assert!(dto.permissions.is_empty());
        assert_eq!(dto.flags, CapabilityFlags::default());
    }

    #[test]
    fn test_create_role_dto_partial_flags() {
        let dto: CreateRoleDto = serde_json::from_str(
            r#"{"name":"Bursar","flags":{"can_manage_finances":true}}"#,
        )
        .unwrap();
        assert!(dto.flags.can_manage_finances);
        assert!(!dto.flags.can_manage_staff);
    }

    #[test]
    fn test_grant_permissions_dto_requires_tokens() {
        let empty = GrantPermissionsDto {
            permissions: vec![],
        };
        assert!(empty.validate().is_err());
    }
}
