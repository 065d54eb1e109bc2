use axum::Json;
use axum::extract::State;
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::School;

use super::model::{SelectSchoolDto, SelectSchoolResponse};
use super::service::SchoolService;
use crate::access::AccessContext;
use crate::access::resolver::load_user;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// List the schools the authenticated user can act in
#[utoipa::path(
    get,
    path = "/api/schools",
    responses(
        (status = 200, description = "Schools available to the user", body = Vec<School>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_schools(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<School>>, AppError> {
    let schools = SchoolService::list_schools_for_user(
        &state.db,
        auth_user.user_id()?,
        auth_user.is_superuser(),
    )
    .await?;
    Ok(Json(schools))
}

/// Select the school to act in
#[utoipa::path(
    post,
    path = "/api/schools/select",
    request_body = SelectSchoolDto,
    responses(
        (status = 200, description = "School selected", body = SelectSchoolResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not a member of the school", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn select_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<SelectSchoolDto>,
) -> Result<Json<SelectSchoolResponse>, AppError> {
    let user = load_user(&state.db, auth_user.user_id()?)
        .await?
        .ok_or_else(|| AppError::unauthorized("Unknown user"))?;

    let school =
        SchoolService::select_school(&state.db, &user, auth_user.is_superuser(), dto.school_id)
            .await?;

    Ok(Json(SelectSchoolResponse {
        message: format!("Now acting in {}", school.name),
        school,
    }))
}

/// Get the school the request is currently acting in
#[utoipa::path(
    get,
    path = "/api/schools/current",
    responses(
        (status = 200, description = "Current school", body = School),
        (status = 400, description = "No current school", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(ctx))]
pub async fn get_current_school(ctx: AccessContext) -> Json<School> {
    Json(ctx.school)
}
