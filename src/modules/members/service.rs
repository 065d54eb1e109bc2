use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use schoolhouse_core::{AppError, PaginationMeta};
use schoolhouse_models::Membership;
use schoolhouse_models::ids::{MembershipId, RoleId, SchoolId, UserId};

use super::model::{AddMemberDto, MemberFilterParams, MemberSummary, PaginatedMembersResponse};

const MEMBER_COLUMNS: &str = "m.id AS membership_id, u.id AS user_id, u.first_name, \
     u.last_name, u.email, r.id AS role_id, r.name AS role_name, m.created_at AS joined_at";

/// List the members of a school, optionally filtered by role.
#[instrument(skip(db, params))]
pub async fn get_members(
    db: &PgPool,
    school_id: SchoolId,
    params: MemberFilterParams,
) -> Result<PaginatedMembersResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let (members, total) = if let Some(role_id) = params.role_id {
        let members = sqlx::query_as::<_, MemberSummary>(&format!(
            "SELECT {} FROM memberships m \
             INNER JOIN users u ON u.id = m.user_id \
             INNER JOIN roles r ON r.id = m.role_id \
             WHERE m.school_id = $1 AND m.role_id = $2 \
             ORDER BY u.last_name, u.first_name LIMIT $3 OFFSET $4",
            MEMBER_COLUMNS
        ))
        .bind(school_id)
        .bind(role_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM memberships WHERE school_id = $1 AND role_id = $2",
        )
        .bind(school_id)
        .bind(role_id)
        .fetch_one(db)
        .await?;

        (members, total)
    } else {
        let members = sqlx::query_as::<_, MemberSummary>(&format!(
            "SELECT {} FROM memberships m \
             INNER JOIN users u ON u.id = m.user_id \
             INNER JOIN roles r ON r.id = m.role_id \
             WHERE m.school_id = $1 \
             ORDER BY u.last_name, u.first_name LIMIT $2 OFFSET $3",
            MEMBER_COLUMNS
        ))
        .bind(school_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM memberships WHERE school_id = $1")
                .bind(school_id)
                .fetch_one(db)
                .await?;

        (members, total)
    };

    let has_more = offset + (members.len() as i64) < total;

    Ok(PaginatedMembersResponse {
        data: members,
        meta: PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: params.pagination.page(),
            has_more,
        },
    })
}

/// Add an existing user to the school with a role.
///
/// The `(user, school)` pair is unique, so a user holds exactly one role
/// per school; re-adding maps to a clear client error.
#[instrument(skip(db, dto), fields(email = %dto.email))]
pub async fn add_member(
    db: &PgPool,
    school_id: SchoolId,
    dto: AddMemberDto,
) -> Result<Membership, AppError> {
    let user_id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("No user with that email")))?;

    ensure_assignable_role(db, dto.role_id, school_id).await?;

    let membership = sqlx::query_as::<_, Membership>(
        "INSERT INTO memberships (user_id, school_id, role_id) VALUES ($1, $2, $3) \
         RETURNING id, user_id, school_id, role_id, created_at, updated_at",
    )
    .bind(user_id)
    .bind(school_id)
    .bind(dto.role_id)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return AppError::bad_request(anyhow!("User is already a member of this school"));
        }
        AppError::from(e)
    })?;

    info!(
        user_id = %user_id,
        school_id = %school_id,
        role_id = %dto.role_id,
        "Member added"
    );

    Ok(membership)
}

/// Re-assign a member's role.
#[instrument(skip(db))]
pub async fn change_role(
    db: &PgPool,
    school_id: SchoolId,
    membership_id: MembershipId,
    role_id: RoleId,
) -> Result<Membership, AppError> {
    ensure_assignable_role(db, role_id, school_id).await?;

    // School-scoped update: a membership id from another school reads as
    // missing.
    let membership = sqlx::query_as::<_, Membership>(
        "UPDATE memberships SET role_id = $1, updated_at = NOW() \
         WHERE id = $2 AND school_id = $3 \
         RETURNING id, user_id, school_id, role_id, created_at, updated_at",
    )
    .bind(role_id)
    .bind(membership_id)
    .bind(school_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Member not found")))?;

    info!(membership_id = %membership_id, role_id = %role_id, "Member role changed");

    Ok(membership)
}

/// Remove a member from the school.
#[instrument(skip(db))]
pub async fn remove_member(
    db: &PgPool,
    school_id: SchoolId,
    membership_id: MembershipId,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM memberships WHERE id = $1 AND school_id = $2")
        .bind(membership_id)
        .bind(school_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("Member not found")));
    }

    info!(membership_id = %membership_id, school_id = %school_id, "Member removed");

    Ok(())
}

/// A role is assignable within a school if the school owns it or it is
/// system-wide.
async fn ensure_assignable_role(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
) -> Result<(), AppError> {
    let assignable = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM roles WHERE id = $1 \
         AND (school_id = $2 OR school_id IS NULL))",
    )
    .bind(role_id)
    .bind(school_id)
    .fetch_one(db)
    .await?;

    if !assignable {
        warn!(role_id = %role_id, school_id = %school_id, "Unassignable role requested");
        return Err(AppError::bad_request(anyhow!(
            "Role cannot be assigned in this school"
        )));
    }

    Ok(())
}
