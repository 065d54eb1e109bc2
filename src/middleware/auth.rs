//! Bearer-token authentication extractor.
//!
//! [`AuthUser`] is the first stage of the guard pipeline: it proves the
//! request carries a valid access token and nothing more. School context
//! and capability checks build on top of it in [`crate::access`].

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use schoolhouse_auth::Claims;
use schoolhouse_auth::jwt::verify_token;
use schoolhouse_core::AppError;
use schoolhouse_models::UserId;

use crate::access::outcome::{AccessDenied, GuardError, TransportHint};
use crate::state::AppState;

/// Extractor that validates the JWT and exposes the authenticated user's
/// claims. Claims carry identity only; authorization state is resolved
/// per request from storage.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as a typed id.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// Whether the token belongs to a global superuser.
    pub fn is_superuser(&self) -> bool {
        self.0.is_superuser
    }

    /// Get the user's email.
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = GuardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let transport = TransportHint::from_headers(&parts.headers);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AccessDenied::not_authenticated(transport))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AccessDenied::not_authenticated(transport))?;

        let claims = verify_token(token, &state.jwt_config)
            .map_err(|_| AccessDenied::not_authenticated(transport))?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_for(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            is_superuser: false,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_parses() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims_for(&id.to_string()));
        assert_eq!(auth_user.user_id().unwrap(), UserId::from_uuid(id));
    }

    #[test]
    fn test_user_id_rejects_garbage_sub() {
        let auth_user = AuthUser(claims_for("not-a-uuid"));
        assert!(auth_user.user_id().is_err());
    }

    #[test]
    fn test_accessors() {
        let mut claims = claims_for(&Uuid::new_v4().to_string());
        claims.is_superuser = true;
        let auth_user = AuthUser(claims);
        assert!(auth_user.is_superuser());
        assert_eq!(auth_user.email(), "test@example.com");
    }
}
