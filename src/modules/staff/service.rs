use sqlx::PgPool;
use tracing::instrument;

use schoolhouse_core::{AppError, PaginationMeta};
use schoolhouse_models::ids::{SchoolId, StaffId};

use super::model::{PaginatedStaffResponse, StaffFilterParams, StaffMember};

const STAFF_COLUMNS: &str =
    "id, school_id, user_id, first_name, last_name, title, created_at, updated_at";

/// List the staff of a school.
#[instrument(skip(db, params))]
pub async fn get_staff(
    db: &PgPool,
    school_id: SchoolId,
    params: StaffFilterParams,
) -> Result<PaginatedStaffResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let staff = sqlx::query_as::<_, StaffMember>(&format!(
        "SELECT {} FROM staff_members WHERE school_id = $1 \
         ORDER BY last_name, first_name LIMIT $2 OFFSET $3",
        STAFF_COLUMNS
    ))
    .bind(school_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff_members WHERE school_id = $1")
            .bind(school_id)
            .fetch_one(db)
            .await?;

    let has_more = offset + (staff.len() as i64) < total;

    Ok(PaginatedStaffResponse {
        data: staff,
        meta: PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: params.pagination.page(),
            has_more,
        },
    })
}

/// Fetch a single staff record.
#[instrument(skip(db))]
pub async fn get_staff_member(db: &PgPool, id: StaffId) -> Result<Option<StaffMember>, AppError> {
    let staff_member = sqlx::query_as::<_, StaffMember>(&format!(
        "SELECT {} FROM staff_members WHERE id = $1",
        STAFF_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(staff_member)
}

/// The school a staff member belongs to, for ownership checks.
#[instrument(skip(db))]
pub async fn find_school_id(db: &PgPool, id: StaffId) -> Result<Option<SchoolId>, AppError> {
    let school_id =
        sqlx::query_scalar::<_, SchoolId>("SELECT school_id FROM staff_members WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;

    Ok(school_id)
}
