use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::ids::RoleId;
use schoolhouse_models::{Role, SystemRoleType};

use super::model::{
    CreateRoleDto, GrantPermissionsDto, PaginatedRolesResponse, RoleFilterParams, UpdateFlagsDto,
};
use super::service;
use crate::access::guard::{RequireManageRoles, require_role_type};
use crate::access::outcome::GuardError;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List roles visible from the current school
#[utoipa::path(
    get,
    path = "/api/roles",
    params(
        ("limit" = Option<i64>, Query, description = "Limit number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination"),
        ("page" = Option<i64>, Query, description = "1-indexed page number")
    ),
    responses(
        (status = 200, description = "Paginated list of roles", body = PaginatedRolesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing manage_roles capability", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, params))]
pub async fn get_roles(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    Query(params): Query<RoleFilterParams>,
) -> Result<Json<PaginatedRolesResponse>, AppError> {
    let roles = service::get_roles(&state.db, ctx.school.id, params).await?;
    Ok(Json(roles))
}

/// Create a role in the current school
#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Duplicate name or invalid tag", body = ErrorResponse),
        (status = 403, description = "Missing manage_roles capability", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn create_role(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = service::create_role(&state.db, ctx.school.id, dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Grant permission tokens to a role
#[utoipa::path(
    post,
    path = "/api/roles/{id}/permissions",
    params(("id" = String, Path, description = "Role ID")),
    request_body = GrantPermissionsDto,
    responses(
        (status = 200, description = "Updated role", body = Role),
        (status = 403, description = "Missing manage_roles capability", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn grant_permissions(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    Path(role_id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<GrantPermissionsDto>,
) -> Result<Json<Role>, AppError> {
    let role =
        service::grant_permissions(&state.db, role_id, ctx.school.id, dto.permissions).await?;
    Ok(Json(role))
}

/// Revoke one permission token from a role
#[utoipa::path(
    delete,
    path = "/api/roles/{id}/permissions/{token}",
    params(
        ("id" = String, Path, description = "Role ID"),
        ("token" = String, Path, description = "Permission token to revoke")
    ),
    responses(
        (status = 200, description = "Updated role", body = Role),
        (status = 403, description = "Missing manage_roles capability", body = ErrorResponse),
        (status = 404, description = "Role or token not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn revoke_permission(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    Path((role_id, token)): Path<(RoleId, String)>,
) -> Result<Json<Role>, AppError> {
    let role = service::revoke_permission(&state.db, role_id, ctx.school.id, &token).await?;
    Ok(Json(role))
}

/// Set named capability flags on a role
#[utoipa::path(
    patch,
    path = "/api/roles/{id}/flags",
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateFlagsDto,
    responses(
        (status = 200, description = "Updated role", body = Role),
        (status = 403, description = "Missing manage_roles capability", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn update_flags(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    Path(role_id): Path<RoleId>,
    Json(dto): Json<UpdateFlagsDto>,
) -> Result<Json<Role>, AppError> {
    let role = service::update_flags(&state.db, role_id, ctx.school.id, dto).await?;
    Ok(Json(role))
}

/// Delete a school role
///
/// Destructive enough that holding `manage_roles` is not sufficient: the
/// caller's role must carry the `principal` tag.
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 400, description = "Role still assigned", body = ErrorResponse),
        (status = 403, description = "Requires the principal role", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn delete_role(
    State(state): State<AppState>,
    RequireManageRoles(ctx): RequireManageRoles,
    Path(role_id): Path<RoleId>,
) -> Result<StatusCode, GuardError> {
    require_role_type(&ctx, &SystemRoleType::Principal)?;

    service::delete_role(&state.db, role_id, ctx.school.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
