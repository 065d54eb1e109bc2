//! Guard predicates and extractors.
//!
//! The pipeline runs in a fixed order (authentication, school
//! resolution, membership resolution, capability check) and every stage
//! completes before the handler body starts, so a denied request never
//! partially executes the operation it was aimed at.
//!
//! Two layers:
//!
//! - plain predicate functions ([`require_capability`],
//!   [`require_any_capability`], [`require_role_type`]) over an already
//!   built [`AccessContext`], for use inside handlers;
//! - extractors (the `Require*` structs) that run the whole pipeline from
//!   request parts, for use in handler signatures.
//!
//! The built context is cached in request extensions, so stacking several
//! extractors on one handler resolves school and membership exactly once.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use schoolhouse_core::Capability;
use schoolhouse_models::SystemRoleType;
use schoolhouse_models::ids::SchoolId;

use crate::access::context::AccessContext;
use crate::access::outcome::{AccessDenied, GuardError, TransportHint};
use crate::access::resolver;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Check one capability against a built context.
///
/// Distinguishes "no role here at all" from "role lacks the capability"
/// so the outcome can send the user to school selection in the first case
/// and back to the dashboard in the second.
pub fn require_capability(
    ctx: &AccessContext,
    capability: Capability,
) -> Result<(), AccessDenied> {
    if ctx.has_capability(capability) {
        return Ok(());
    }

    if ctx.membership.is_none() && !ctx.user.is_superuser {
        warn!(
            user_id = %ctx.user.id,
            school_id = %ctx.school.id,
            "Access denied: no membership in school"
        );
        return Err(AccessDenied::no_membership(ctx.transport));
    }

    warn!(
        user_id = %ctx.user.id,
        school_id = %ctx.school.id,
        capability = capability.as_token(),
        "Access denied: missing capability"
    );
    Err(AccessDenied::missing_capability(
        capability.as_token(),
        ctx.transport,
    ))
}

/// Check that at least one of `capabilities` is granted.
///
/// Used by combined admin screens that are reachable through more than
/// one capability. The deny message names the first capability so the
/// user is pointed at something actionable.
pub fn require_any_capability(
    ctx: &AccessContext,
    capabilities: &[Capability],
) -> Result<(), AccessDenied> {
    if ctx.has_any_capability(capabilities) {
        return Ok(());
    }

    if ctx.membership.is_none() && !ctx.user.is_superuser {
        warn!(
            user_id = %ctx.user.id,
            school_id = %ctx.school.id,
            "Access denied: no membership in school"
        );
        return Err(AccessDenied::no_membership(ctx.transport));
    }

    let wanted = capabilities
        .first()
        .map(Capability::as_token)
        .unwrap_or("unspecified");
    warn!(
        user_id = %ctx.user.id,
        school_id = %ctx.school.id,
        capability = wanted,
        "Access denied: missing capability"
    );
    Err(AccessDenied::missing_capability(wanted, ctx.transport))
}

/// Check that the user's role in this school is of the required kind.
///
/// Superusers pass; everyone else must hold a membership whose role
/// carries exactly the required tag.
pub fn require_role_type(
    ctx: &AccessContext,
    required: &SystemRoleType,
) -> Result<(), AccessDenied> {
    if ctx.user.is_superuser {
        return Ok(());
    }

    match ctx.role_type() {
        None => {
            warn!(
                user_id = %ctx.user.id,
                school_id = %ctx.school.id,
                "Access denied: no membership in school"
            );
            Err(AccessDenied::no_membership(ctx.transport))
        }
        Some(role_type) if role_type == required => Ok(()),
        Some(role_type) => {
            warn!(
                user_id = %ctx.user.id,
                school_id = %ctx.school.id,
                required = required.as_str(),
                actual = role_type.as_str(),
                "Access denied: role mismatch"
            );
            Err(AccessDenied::role_mismatch(required.as_str(), ctx.transport))
        }
    }
}

/// Explicit school hint attached to the request, if any.
///
/// Upstream tenant-detection middleware (subdomain routing, a gateway)
/// can install a [`SchoolId`] extension; API clients can send an
/// `X-School-Id` header. The extension wins.
fn school_hint(parts: &Parts) -> Option<SchoolId> {
    if let Some(id) = parts.extensions.get::<SchoolId>() {
        return Some(*id);
    }

    parts
        .headers
        .get("x-school-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl FromRequestParts<AppState> for AccessContext {
    type Rejection = GuardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Resolving twice within one request must yield the same context,
        // so the first resolution is cached in the request extensions.
        if let Some(ctx) = parts.extensions.get::<AccessContext>() {
            return Ok(ctx.clone());
        }

        let transport = TransportHint::from_headers(&parts.headers);

        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let user_id = auth_user.user_id().map_err(GuardError::Internal)?;

        // A valid token for a since-deleted user reads as unauthenticated.
        let user = resolver::load_user(&state.db, user_id)
            .await?
            .ok_or_else(|| AccessDenied::not_authenticated(transport))?;

        let school = resolver::resolve_current_school(&state.db, &user, school_hint(parts))
            .await?
            .ok_or_else(|| AccessDenied::no_school(transport))?;

        let membership = resolver::resolve_membership(&state.db, user.id, school.id).await?;

        let ctx = AccessContext {
            user,
            school,
            membership,
            transport,
        };
        parts.extensions.insert(ctx.clone());

        Ok(ctx)
    }
}

/// Generate an extractor that runs the full pipeline and then requires
/// one capability.
macro_rules! require_capability_extractor {
    ($(#[$meta:meta])* $name:ident, $capability:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AccessContext);

        impl FromRequestParts<AppState> for $name {
            type Rejection = GuardError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let ctx = AccessContext::from_request_parts(parts, state).await?;
                require_capability(&ctx, $capability)?;
                Ok($name(ctx))
            }
        }
    };
}

require_capability_extractor!(
    /// Requires the `manage_academics` capability.
    RequireManageAcademics,
    Capability::ManageAcademics
);
require_capability_extractor!(
    /// Requires the `manage_students` capability.
    RequireManageStudents,
    Capability::ManageStudents
);
require_capability_extractor!(
    /// Requires the `manage_staff` capability.
    RequireManageStaff,
    Capability::ManageStaff
);
require_capability_extractor!(
    /// Requires the `manage_roles` capability.
    RequireManageRoles,
    Capability::ManageRoles
);
require_capability_extractor!(
    /// Requires the `manage_finances` capability.
    RequireManageFinances,
    Capability::ManageFinances
);
require_capability_extractor!(
    /// Requires the `view_reports` capability.
    RequireViewReports,
    Capability::ViewReports
);
require_capability_extractor!(
    /// Requires the `communicate` capability.
    RequireCommunicate,
    Capability::Communicate
);
require_capability_extractor!(
    /// Requires the `manage_attendance` capability.
    RequireManageAttendance,
    Capability::ManageAttendance
);
