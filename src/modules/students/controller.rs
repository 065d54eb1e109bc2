use axum::Json;
use axum::extract::{Path, Query, State, rejection::QueryRejection};
use axum::http::StatusCode;
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::ids::StudentId;

use super::model::{CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams};
use super::service;
use crate::access::guard::RequireManageStudents;
use crate::access::outcome::{AccessDenied, GuardError};
use crate::access::ownership::{OwnedResource, require_school_ownership};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the students of the current school
#[utoipa::path(
    get,
    path = "/api/students",
    params(
        ("name" = Option<String>, Query, description = "Filter by first or last name (partial match)"),
        ("limit" = Option<i64>, Query, description = "Limit number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination")
    ),
    responses(
        (status = 200, description = "Paginated list of students", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing manage_students capability", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, filters))]
pub async fn get_students(
    State(state): State<AppState>,
    RequireManageStudents(ctx): RequireManageStudents,
    filters: Result<Query<StudentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let students = service::get_students(&state.db, ctx.school.id, filters).await?;
    Ok(Json(students))
}

/// Enroll a student in the current school
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student enrolled", body = Student),
        (status = 400, description = "Duplicate admission number", body = ErrorResponse),
        (status = 403, description = "Missing manage_students capability", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireManageStudents(ctx): RequireManageStudents,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = service::create_student(&state.db, ctx.school.id, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Get one student record
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student record", body = Student),
        (status = 403, description = "Missing manage_students capability", body = ErrorResponse),
        (status = 404, description = "Not found or access denied", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_student(
    State(state): State<AppState>,
    RequireManageStudents(ctx): RequireManageStudents,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, GuardError> {
    require_school_ownership(&state.db, &ctx, OwnedResource::Student(id)).await?;

    let student = service::get_student(&state.db, id)
        .await?
        .ok_or_else(|| AccessDenied::not_found(ctx.transport))?;

    Ok(Json(student))
}
