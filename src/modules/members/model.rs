use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use schoolhouse_core::serde::deserialize_optional_uuid;
use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::ids::{MembershipId, RoleId, UserId};

/// One member of a school, as shown on the members screen.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MemberSummary {
    pub membership_id: MembershipId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: RoleId,
    pub role_name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for adding an existing user to the school.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddMemberDto {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[schema(value_type = String, format = "uuid")]
    pub role_id: RoleId,
}

/// DTO for re-assigning a member's role.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleDto {
    #[schema(value_type = String, format = "uuid")]
    pub role_id: RoleId,
}

/// Query parameters for listing members.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MemberFilterParams {
    /// Filter by role ID
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub role_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing members.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedMembersResponse {
    pub data: Vec<MemberSummary>,
    pub meta: PaginationMeta,
}
