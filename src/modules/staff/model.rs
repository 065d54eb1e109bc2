use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::ids::{SchoolId, StaffId, UserId};

/// A staff member employed by a school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub id: StaffId,
    pub school_id: SchoolId,
    /// Linked user account, when the staff member has a login.
    pub user_id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Query parameters for listing staff.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing staff members.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStaffResponse {
    pub data: Vec<StaffMember>,
    pub meta: PaginationMeta,
}
