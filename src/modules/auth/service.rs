use sqlx::PgPool;
use tracing::{info, instrument, warn};

use schoolhouse_auth::jwt::create_access_token;
use schoolhouse_config::JwtConfig;
use schoolhouse_core::{AppError, verify_password};
use schoolhouse_models::{User, UserId};

use super::model::{Credentials, LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// endpoint cannot be used to probe for accounts.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, email, password, is_superuser FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            warn!(email = %dto.email, "Login attempt for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            warn!(user_id = %credentials.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let user = Self::get_user(db, credentials.id).await?;

        let access_token = create_access_token(
            user.id.into_inner(),
            &user.email,
            user.is_superuser,
            jwt_config,
        )?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse { access_token, user })
    }

    /// Load the profile of an authenticated user.
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, is_superuser, current_school_id, \
             created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
