use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use schoolhouse_core::Capability;
use schoolhouse_models::Membership;
use schoolhouse_models::ids::MembershipId;

use super::model::{AddMemberDto, ChangeRoleDto, MemberFilterParams, PaginatedMembersResponse};
use super::service;
use crate::access::AccessContext;
use crate::access::guard::require_any_capability;
use crate::access::outcome::GuardError;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Capabilities that open the members screen.
const MEMBER_ADMIN: [Capability; 2] = [Capability::ManageStaff, Capability::ManageRoles];

/// List the members of the current school
#[utoipa::path(
    get,
    path = "/api/members",
    params(
        ("role_id" = Option<String>, Query, description = "Filter by role ID"),
        ("limit" = Option<i64>, Query, description = "Limit number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination")
    ),
    responses(
        (status = 200, description = "Paginated list of members", body = PaginatedMembersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse)
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, params))]
pub async fn get_members(
    State(state): State<AppState>,
    ctx: AccessContext,
    Query(params): Query<MemberFilterParams>,
) -> Result<Json<PaginatedMembersResponse>, GuardError> {
    require_any_capability(&ctx, &MEMBER_ADMIN)?;

    let members = service::get_members(&state.db, ctx.school.id, params).await?;
    Ok(Json(members))
}

/// Add an existing user to the current school
#[utoipa::path(
    post,
    path = "/api/members",
    request_body = AddMemberDto,
    responses(
        (status = 201, description = "Member added", body = Membership),
        (status = 400, description = "Already a member or invalid role", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "No user with that email", body = ErrorResponse)
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn add_member(
    State(state): State<AppState>,
    ctx: AccessContext,
    ValidatedJson(dto): ValidatedJson<AddMemberDto>,
) -> Result<(StatusCode, Json<Membership>), GuardError> {
    require_any_capability(&ctx, &MEMBER_ADMIN)?;

    let membership = service::add_member(&state.db, ctx.school.id, dto).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// Change a member's role
#[utoipa::path(
    patch,
    path = "/api/members/{id}",
    params(("id" = String, Path, description = "Membership ID")),
    request_body = ChangeRoleDto,
    responses(
        (status = 200, description = "Member updated", body = Membership),
        (status = 400, description = "Invalid role", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn change_member_role(
    State(state): State<AppState>,
    ctx: AccessContext,
    Path(membership_id): Path<MembershipId>,
    Json(dto): Json<ChangeRoleDto>,
) -> Result<Json<Membership>, GuardError> {
    require_any_capability(&ctx, &MEMBER_ADMIN)?;

    let membership =
        service::change_role(&state.db, ctx.school.id, membership_id, dto.role_id).await?;
    Ok(Json(membership))
}

/// Remove a member from the current school
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = String, Path, description = "Membership ID")),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn remove_member(
    State(state): State<AppState>,
    ctx: AccessContext,
    Path(membership_id): Path<MembershipId>,
) -> Result<StatusCode, GuardError> {
    require_any_capability(&ctx, &MEMBER_ADMIN)?;

    service::remove_member(&state.db, ctx.school.id, membership_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
