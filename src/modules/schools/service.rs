use sqlx::PgPool;
use tracing::{info, instrument, warn};

use schoolhouse_core::AppError;
use schoolhouse_models::ids::{SchoolId, UserId};
use schoolhouse_models::{School, User};

pub struct SchoolService;

const SCHOOL_COLUMNS: &str = "id, name, address, is_active, created_at, updated_at";

impl SchoolService {
    /// The active schools a user can act in.
    ///
    /// Superusers see every active school; everyone else sees the schools
    /// they hold a membership in.
    #[instrument(skip(db))]
    pub async fn list_schools_for_user(
        db: &PgPool,
        user_id: UserId,
        is_superuser: bool,
    ) -> Result<Vec<School>, AppError> {
        let schools = if is_superuser {
            sqlx::query_as::<_, School>(&format!(
                "SELECT {} FROM schools WHERE is_active = true ORDER BY name",
                SCHOOL_COLUMNS
            ))
            .fetch_all(db)
            .await?
        } else {
            sqlx::query_as::<_, School>(
                "SELECT s.id, s.name, s.address, s.is_active, s.created_at, s.updated_at \
                 FROM schools s \
                 INNER JOIN memberships m ON s.id = m.school_id \
                 WHERE m.user_id = $1 AND s.is_active = true \
                 ORDER BY s.name",
            )
            .bind(user_id)
            .fetch_all(db)
            .await?
        };

        Ok(schools)
    }

    /// Make `school_id` the user's remembered current school.
    ///
    /// Non-superusers must hold a membership in the school. The same
    /// response covers an unknown school and an inactive one.
    #[instrument(skip(db, user), fields(user_id = %user.id))]
    pub async fn select_school(
        db: &PgPool,
        user: &User,
        is_superuser: bool,
        school_id: SchoolId,
    ) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(&format!(
            "SELECT {} FROM schools WHERE id = $1 AND is_active = true",
            SCHOOL_COLUMNS
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))?;

        if !is_superuser {
            let is_member = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM memberships WHERE user_id = $1 AND school_id = $2)",
            )
            .bind(user.id)
            .bind(school_id)
            .fetch_one(db)
            .await?;

            if !is_member {
                warn!(
                    user_id = %user.id,
                    school_id = %school_id,
                    "Attempt to select a school without membership"
                );
                return Err(AppError::forbidden("You are not a member of this school"));
            }
        }

        sqlx::query("UPDATE users SET current_school_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(school_id)
            .bind(user.id)
            .execute(db)
            .await?;

        info!(user_id = %user.id, school_id = %school_id, "Current school selected");

        Ok(school)
    }
}
