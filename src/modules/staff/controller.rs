use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::ids::StaffId;

use super::model::{PaginatedStaffResponse, StaffFilterParams, StaffMember};
use super::service;
use crate::access::guard::RequireManageStaff;
use crate::access::outcome::{AccessDenied, GuardError};
use crate::access::ownership::{OwnedResource, require_school_ownership};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// List the staff of the current school
#[utoipa::path(
    get,
    path = "/api/staff",
    params(
        ("limit" = Option<i64>, Query, description = "Limit number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination")
    ),
    responses(
        (status = 200, description = "Paginated list of staff", body = PaginatedStaffResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing manage_staff capability", body = ErrorResponse)
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, params))]
pub async fn get_staff(
    State(state): State<AppState>,
    RequireManageStaff(ctx): RequireManageStaff,
    Query(params): Query<StaffFilterParams>,
) -> Result<Json<PaginatedStaffResponse>, AppError> {
    let staff = service::get_staff(&state.db, ctx.school.id, params).await?;
    Ok(Json(staff))
}

/// Get one staff record
#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(("id" = String, Path, description = "Staff member ID")),
    responses(
        (status = 200, description = "Staff record", body = StaffMember),
        (status = 403, description = "Missing manage_staff capability", body = ErrorResponse),
        (status = 404, description = "Not found or access denied", body = ErrorResponse)
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_staff_member(
    State(state): State<AppState>,
    RequireManageStaff(ctx): RequireManageStaff,
    Path(id): Path<StaffId>,
) -> Result<Json<StaffMember>, GuardError> {
    require_school_ownership(&state.db, &ctx, OwnedResource::StaffMember(id)).await?;

    let staff_member = service::get_staff_member(&state.db, id)
        .await?
        .ok_or_else(|| AccessDenied::not_found(ctx.transport))?;

    Ok(Json(staff_member))
}
