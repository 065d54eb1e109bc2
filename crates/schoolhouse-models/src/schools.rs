//! School entities.
//!
//! A school is the isolation boundary for everything else: memberships,
//! roles, students, staff, and invoices all hang off exactly one school,
//! and every permission decision is scoped to one.

use crate::ids::SchoolId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A school (tenant).
///
/// Schools are created by operators independently of users; deactivated
/// schools keep their data but stop resolving as anyone's current school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_serialization() {
        let school = School {
            id: SchoolId::new(),
            name: "Hillcrest Academy".to_string(),
            address: Some("12 College Road".to_string()),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&school).unwrap();
        assert!(serialized.contains("Hillcrest Academy"));
        assert!(serialized.contains("12 College Road"));
    }
}
