//! Capability vocabulary for access control.
//!
//! Every permission decision in the API is expressed in terms of a fixed
//! set of capability tokens. Roles grant capabilities either through their
//! `permissions` token list (which may contain the [`WILDCARD`]) or through
//! per-capability boolean columns; the mapping between tokens and columns
//! lives in `schoolhouse_models::roles::CapabilityFlags` as an exhaustive
//! `match`, so a new [`Capability`] variant cannot be added without also
//! deciding its column.
//!
//! # Example
//!
//! ```ignore
//! use schoolhouse_core::capabilities::Capability;
//!
//! assert_eq!(Capability::from_token("manage_staff"), Some(Capability::ManageStaff));
//! // Legacy admissions screens were folded into student management.
//! assert_eq!(Capability::from_token("manage_admissions"), Some(Capability::ManageStudents));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The special permission token granting every capability.
pub const WILDCARD: &str = "*";

/// Legacy token kept for pre-split admissions clients.
pub const LEGACY_MANAGE_ADMISSIONS: &str = "manage_admissions";

/// A single class of operations that can be granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageAcademics,
    ManageStudents,
    ManageStaff,
    ManageRoles,
    ManageFinances,
    ViewReports,
    Communicate,
    ManageAttendance,
}

impl Capability {
    /// Every capability, in display order.
    pub const ALL: [Capability; 8] = [
        Capability::ManageAcademics,
        Capability::ManageStudents,
        Capability::ManageStaff,
        Capability::ManageRoles,
        Capability::ManageFinances,
        Capability::ViewReports,
        Capability::Communicate,
        Capability::ManageAttendance,
    ];

    /// The canonical string token for this capability.
    #[must_use]
    pub fn as_token(&self) -> &'static str {
        match self {
            Capability::ManageAcademics => "manage_academics",
            Capability::ManageStudents => "manage_students",
            Capability::ManageStaff => "manage_staff",
            Capability::ManageRoles => "manage_roles",
            Capability::ManageFinances => "manage_finances",
            Capability::ViewReports => "view_reports",
            Capability::Communicate => "communicate",
            Capability::ManageAttendance => "manage_attendance",
        }
    }

    /// Parse a request token into a capability.
    ///
    /// Returns `None` for tokens outside the vocabulary. The legacy
    /// `manage_admissions` token maps to [`Capability::ManageStudents`].
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "manage_academics" => Some(Capability::ManageAcademics),
            "manage_students" => Some(Capability::ManageStudents),
            "manage_staff" => Some(Capability::ManageStaff),
            "manage_roles" => Some(Capability::ManageRoles),
            "manage_finances" => Some(Capability::ManageFinances),
            "view_reports" => Some(Capability::ViewReports),
            "communicate" => Some(Capability::Communicate),
            "manage_attendance" => Some(Capability::ManageAttendance),
            LEGACY_MANAGE_ADMISSIONS => Some(Capability::ManageStudents),
            _ => None,
        }
    }

    /// The canonical form of a token: legacy synonyms are rewritten,
    /// unknown tokens pass through unchanged.
    #[must_use]
    pub fn canonical_token(token: &str) -> &str {
        match Self::from_token(token) {
            Some(capability) => capability.as_token(),
            None => token,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for capability in Capability::ALL {
            assert_eq!(Capability::from_token(capability.as_token()), Some(capability));
        }
    }

    #[test]
    fn test_legacy_admissions_maps_to_students() {
        assert_eq!(
            Capability::from_token("manage_admissions"),
            Some(Capability::ManageStudents)
        );
        assert_eq!(
            Capability::canonical_token("manage_admissions"),
            "manage_students"
        );
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(Capability::from_token("launch_rockets"), None);
        assert_eq!(Capability::canonical_token("launch_rockets"), "launch_rockets");
    }

    #[test]
    fn test_wildcard_is_not_a_capability() {
        assert_eq!(Capability::from_token(WILDCARD), None);
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(Capability::ManageFinances.to_string(), "manage_finances");
    }

    #[test]
    fn test_serde_uses_snake_case_tokens() {
        let json = serde_json::to_string(&Capability::ViewReports).unwrap();
        assert_eq!(json, r#""view_reports""#);
        let parsed: Capability = serde_json::from_str(r#""manage_attendance""#).unwrap();
        assert_eq!(parsed, Capability::ManageAttendance);
    }
}
