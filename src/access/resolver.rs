//! School and membership resolution.
//!
//! Storage lookups backing the guard pipeline. All lookups return
//! `Option`: a missing user, school, or membership is a deniable state
//! for the guard to classify, while genuine query failures bubble up as
//! [`AppError`]s and fail the request closed.

use sqlx::PgPool;
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::ids::{SchoolId, UserId};
use schoolhouse_models::{Membership, MembershipWithRole, Role, School, User};

const ROLE_COLUMNS: &str = "id, school_id, name, slug, description, system_role_type, \
     permissions, can_manage_academics, can_manage_students, can_manage_staff, \
     can_manage_roles, can_manage_finances, can_view_reports, can_communicate, \
     can_manage_attendance, created_at, updated_at";

/// Load the full user record behind a set of verified claims.
#[instrument(skip(db))]
pub async fn load_user(db: &PgPool, id: UserId) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, is_superuser, current_school_id, \
         created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

/// Resolve the school this request is acting in.
///
/// Precedence, first match wins:
///
/// 1. an explicit hint attached to the request (extension or header);
/// 2. the user's remembered `current_school_id`;
/// 3. the school of the user's first membership, ordered by membership id;
/// 4. none.
///
/// Inactive schools never resolve; a hint naming one simply falls through
/// to the next step.
#[instrument(skip(db, user), fields(user_id = %user.id))]
pub async fn resolve_current_school(
    db: &PgPool,
    user: &User,
    hint: Option<SchoolId>,
) -> Result<Option<School>, AppError> {
    if let Some(school_id) = hint {
        if let Some(school) = find_active_school(db, school_id).await? {
            return Ok(Some(school));
        }
    }

    if let Some(school_id) = user.current_school_id {
        if let Some(school) = find_active_school(db, school_id).await? {
            return Ok(Some(school));
        }
    }

    if let Some(membership) = first_membership(db, user.id).await? {
        if let Some(school) = find_active_school(db, membership.school_id).await? {
            return Ok(Some(school));
        }
    }

    Ok(None)
}

/// Look up the unique membership for (user, school), joined with its role.
///
/// A membership pointing at a deleted role resolves to `None`: a role-less
/// membership grants nothing, and the guard treats it like any other
/// missing membership.
#[instrument(skip(db))]
pub async fn resolve_membership(
    db: &PgPool,
    user_id: UserId,
    school_id: SchoolId,
) -> Result<Option<MembershipWithRole>, AppError> {
    let membership = sqlx::query_as::<_, Membership>(
        "SELECT id, user_id, school_id, role_id, created_at, updated_at \
         FROM memberships WHERE user_id = $1 AND school_id = $2",
    )
    .bind(user_id)
    .bind(school_id)
    .fetch_optional(db)
    .await?;

    let Some(membership) = membership else {
        return Ok(None);
    };

    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {} FROM roles WHERE id = $1",
        ROLE_COLUMNS
    ))
    .bind(membership.role_id)
    .fetch_optional(db)
    .await?;

    Ok(role.map(|role| MembershipWithRole::new(membership, role)))
}

async fn first_membership(db: &PgPool, user_id: UserId) -> Result<Option<Membership>, AppError> {
    let membership = sqlx::query_as::<_, Membership>(
        "SELECT id, user_id, school_id, role_id, created_at, updated_at \
         FROM memberships WHERE user_id = $1 ORDER BY id LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(membership)
}

async fn find_active_school(db: &PgPool, id: SchoolId) -> Result<Option<School>, AppError> {
    let school = sqlx::query_as::<_, School>(
        "SELECT id, name, address, is_active, created_at, updated_at \
         FROM schools WHERE id = $1 AND is_active = true",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(school)
}
