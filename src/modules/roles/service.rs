use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use schoolhouse_core::capabilities::Capability;
use schoolhouse_core::{AppError, PaginationMeta};
use schoolhouse_models::ids::{RoleId, SchoolId};
use schoolhouse_models::roles::generate_slug;
use schoolhouse_models::{Role, SystemRoleType};

use super::model::{CreateRoleDto, PaginatedRolesResponse, RoleFilterParams, UpdateFlagsDto};

const ROLE_COLUMNS: &str = "id, school_id, name, slug, description, system_role_type, \
     permissions, can_manage_academics, can_manage_students, can_manage_staff, \
     can_manage_roles, can_manage_finances, can_view_reports, can_communicate, \
     can_manage_attendance, created_at, updated_at";

/// Roles visible from a school: its own roles plus system-wide ones.
#[instrument(skip(db, params))]
pub async fn get_roles(
    db: &PgPool,
    school_id: SchoolId,
    params: RoleFilterParams,
) -> Result<PaginatedRolesResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let roles = sqlx::query_as::<_, Role>(&format!(
        "SELECT {} FROM roles WHERE school_id = $1 OR school_id IS NULL \
         ORDER BY name LIMIT $2 OFFSET $3",
        ROLE_COLUMNS
    ))
    .bind(school_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM roles WHERE school_id = $1 OR school_id IS NULL",
    )
    .bind(school_id)
    .fetch_one(db)
    .await?;

    let has_more = offset + (roles.len() as i64) < total;

    Ok(PaginatedRolesResponse {
        data: roles,
        meta: PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: params.pagination.page(),
            has_more,
        },
    })
}

/// Create a role owned by the school.
#[instrument(skip(db, dto), fields(role.name = %dto.name))]
pub async fn create_role(
    db: &PgPool,
    school_id: SchoolId,
    dto: CreateRoleDto,
) -> Result<Role, AppError> {
    let system_role_type = dto
        .system_role_type
        .as_deref()
        .map(SystemRoleType::parse)
        .unwrap_or(SystemRoleType::AdminStaff);

    if system_role_type.is_super_admin() {
        return Err(AppError::bad_request(anyhow!(
            "School roles cannot use the super_admin tag"
        )));
    }

    let permissions = normalize_tokens(dto.permissions);
    let slug = generate_slug(&dto.name);

    let role = sqlx::query_as::<_, Role>(&format!(
        "INSERT INTO roles (school_id, name, slug, description, system_role_type, permissions, \
         can_manage_academics, can_manage_students, can_manage_staff, can_manage_roles, \
         can_manage_finances, can_view_reports, can_communicate, can_manage_attendance) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {}",
        ROLE_COLUMNS
    ))
    .bind(school_id)
    .bind(&dto.name)
    .bind(&slug)
    .bind(&dto.description)
    .bind(&system_role_type)
    .bind(&permissions)
    .bind(dto.flags.can_manage_academics)
    .bind(dto.flags.can_manage_students)
    .bind(dto.flags.can_manage_staff)
    .bind(dto.flags.can_manage_roles)
    .bind(dto.flags.can_manage_finances)
    .bind(dto.flags.can_view_reports)
    .bind(dto.flags.can_communicate)
    .bind(dto.flags.can_manage_attendance)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return AppError::bad_request(anyhow!(
                "A role with this name already exists in this school"
            ));
        }
        AppError::from(e)
    })?;

    info!(role_id = %role.id, school_id = %school_id, "Role created");

    Ok(role)
}

/// Load a role the school is allowed to edit.
///
/// System-wide roles are visible but not editable from a school, and a
/// role belonging to another school reads exactly like a missing one.
#[instrument(skip(db))]
pub async fn find_school_role(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
) -> Result<Role, AppError> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {} FROM roles WHERE id = $1",
        ROLE_COLUMNS
    ))
    .bind(role_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))?;

    match role.school_id {
        Some(owner) if owner == school_id => Ok(role),
        Some(_) => {
            warn!(role_id = %role_id, school_id = %school_id, "Cross-school role access refused");
            Err(AppError::not_found(anyhow!("Role not found")))
        }
        None => Err(AppError::forbidden(
            "System roles cannot be modified from a school",
        )),
    }
}

/// Append permission tokens to a role.
///
/// Purely additive: existing tokens are kept, duplicates are dropped, and
/// the flags columns are untouched.
#[instrument(skip(db, tokens))]
pub async fn grant_permissions(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
    tokens: Vec<String>,
) -> Result<Role, AppError> {
    let role = find_school_role(db, role_id, school_id).await?;

    let mut permissions = role.permissions.clone();
    for token in normalize_tokens(tokens) {
        if !permissions.contains(&token) {
            permissions.push(token);
        }
    }

    let updated = update_permissions(db, role_id, &permissions).await?;
    info!(role_id = %role_id, "Permissions granted");
    Ok(updated)
}

/// Remove a single permission token from a role.
///
/// The one place a role's token grants shrink, and it names exactly one
/// token. Revoking a token the role does not hold is an error, not a
/// silent no-op.
#[instrument(skip(db))]
pub async fn revoke_permission(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
    token: &str,
) -> Result<Role, AppError> {
    let role = find_school_role(db, role_id, school_id).await?;

    let canonical = Capability::canonical_token(token);
    let before = role.permissions.len();
    let permissions: Vec<String> = role
        .permissions
        .into_iter()
        .filter(|p| p != token && p != canonical)
        .collect();

    if permissions.len() == before {
        return Err(AppError::not_found(anyhow!(
            "Role does not hold the {} permission",
            token
        )));
    }

    let updated = update_permissions(db, role_id, &permissions).await?;
    info!(role_id = %role_id, token = token, "Permission revoked");
    Ok(updated)
}

/// Set named capability flags on a role.
///
/// Only the flags present in the request change; the permissions list is
/// untouched.
#[instrument(skip(db, dto))]
pub async fn update_flags(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
    dto: UpdateFlagsDto,
) -> Result<Role, AppError> {
    let role = find_school_role(db, role_id, school_id).await?;

    let mut flags = role.flags;
    if let Some(v) = dto.can_manage_academics {
        flags.can_manage_academics = v;
    }
    if let Some(v) = dto.can_manage_students {
        flags.can_manage_students = v;
    }
    if let Some(v) = dto.can_manage_staff {
        flags.can_manage_staff = v;
    }
    if let Some(v) = dto.can_manage_roles {
        flags.can_manage_roles = v;
    }
    if let Some(v) = dto.can_manage_finances {
        flags.can_manage_finances = v;
    }
    if let Some(v) = dto.can_view_reports {
        flags.can_view_reports = v;
    }
    if let Some(v) = dto.can_communicate {
        flags.can_communicate = v;
    }
    if let Some(v) = dto.can_manage_attendance {
        flags.can_manage_attendance = v;
    }

    let role = sqlx::query_as::<_, Role>(&format!(
        "UPDATE roles SET can_manage_academics = $1, can_manage_students = $2, \
         can_manage_staff = $3, can_manage_roles = $4, can_manage_finances = $5, \
         can_view_reports = $6, can_communicate = $7, can_manage_attendance = $8, \
         updated_at = NOW() WHERE id = $9 RETURNING {}",
        ROLE_COLUMNS
    ))
    .bind(flags.can_manage_academics)
    .bind(flags.can_manage_students)
    .bind(flags.can_manage_staff)
    .bind(flags.can_manage_roles)
    .bind(flags.can_manage_finances)
    .bind(flags.can_view_reports)
    .bind(flags.can_communicate)
    .bind(flags.can_manage_attendance)
    .bind(role.id)
    .fetch_one(db)
    .await?;

    info!(role_id = %role_id, "Capability flags updated");

    Ok(role)
}

/// Delete a school role.
#[instrument(skip(db))]
pub async fn delete_role(
    db: &PgPool,
    role_id: RoleId,
    school_id: SchoolId,
) -> Result<(), AppError> {
    let role = find_school_role(db, role_id, school_id).await?;

    sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(role.id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow!(
                    "Role is still assigned to members and cannot be deleted"
                ));
            }
            AppError::from(e)
        })?;

    info!(role_id = %role_id, school_id = %school_id, "Role deleted");

    Ok(())
}

async fn update_permissions(
    db: &PgPool,
    role_id: RoleId,
    permissions: &[String],
) -> Result<Role, AppError> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "UPDATE roles SET permissions = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
        ROLE_COLUMNS
    ))
    .bind(permissions)
    .bind(role_id)
    .fetch_one(db)
    .await?;

    Ok(role)
}

/// Canonicalize and dedup a token list, rewriting legacy synonyms.
fn normalize_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let canonical = Capability::canonical_token(&token).to_string();
        if !normalized.contains(&canonical) {
            normalized.push(canonical);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tokens_rewrites_legacy() {
        let tokens = vec![
            "manage_admissions".to_string(),
            "manage_students".to_string(),
            "*".to_string(),
        ];
        assert_eq!(
            normalize_tokens(tokens),
            vec!["manage_students".to_string(), "*".to_string()]
        );
    }

    #[test]
    fn test_normalize_tokens_keeps_unknown() {
        let tokens = vec!["custom_capability".to_string()];
        assert_eq!(normalize_tokens(tokens), vec!["custom_capability".to_string()]);
    }
}
