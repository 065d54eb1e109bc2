//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in access tokens.
///
/// Identity only. Authorization state (memberships, roles, capability
/// grants) is looked up per request so that permission edits apply
/// immediately.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Whether the user is a global superuser
    pub is_superuser: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_claims_serde_round_trip() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "principal@hillcrest.example".to_string(),
            is_superuser: false,
            exp: 9999999999,
            iat: 1234567890,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.email, claims.email);
        assert!(!back.is_superuser);
    }
}
