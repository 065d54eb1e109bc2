//! JWT creation and verification.
//!
//! HS256 tokens signed with the secret from [`JwtConfig`]. Verification
//! failures (bad signature, expiry, malformed token) all surface as a
//! single unauthorized error; callers never learn which check failed.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use schoolhouse_config::JwtConfig;
use schoolhouse_core::AppError;

use crate::claims::Claims;

/// Creates an access token for an authenticated user.
///
/// # Arguments
///
/// * `user_id` - The user's UUID
/// * `email` - The user's email address
/// * `is_superuser` - Whether the user bypasses school-scoped checks
/// * `jwt_config` - JWT configuration containing the secret and expiry settings
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g., invalid secret key).
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    is_superuser: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        is_superuser,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token =
            create_access_token(user_id, "teacher@hillcrest.example", false, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "teacher@hillcrest.example");
        assert!(!claims.is_superuser);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_superuser_flag_survives_round_trip() {
        let config = test_config();
        let token = create_access_token(Uuid::new_v4(), "ops@example.com", true, &config).unwrap();
        assert!(verify_token(&token, &config).unwrap().is_superuser);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config();
        let token = create_access_token(Uuid::new_v4(), "a@b.c", false, &config).unwrap();

        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            access_token_expiry: 3600,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let config = JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: -7200, // already expired at issue time
        };
        let token = create_access_token(Uuid::new_v4(), "a@b.c", false, &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token("definitely.not.ajwt", &test_config()).is_err());
    }
}
