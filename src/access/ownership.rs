//! School-ownership checks for resource-level routes.
//!
//! Capability checks say what a user may do; ownership checks say which
//! records they may do it to. [`require_school_ownership`] confirms that a
//! resource referenced by id actually belongs to the request's current
//! school before the handler touches it.
//!
//! A nonexistent id and an id belonging to another school produce the
//! same deny outcome, so callers cannot probe for the existence of
//! records in schools they cannot see.

use sqlx::PgPool;
use tracing::warn;

use schoolhouse_models::ids::{InvoiceId, SchoolId, StaffId, StudentId};

use crate::access::context::AccessContext;
use crate::access::outcome::{AccessDenied, GuardError};
use crate::modules::{invoices, staff, students};

/// A reference to a record in one of the school-owned domains.
#[derive(Debug, Clone, Copy)]
pub enum OwnedResource {
    Student(StudentId),
    StaffMember(StaffId),
    Invoice(InvoiceId),
}

impl OwnedResource {
    fn domain(&self) -> &'static str {
        match self {
            OwnedResource::Student(_) => "student",
            OwnedResource::StaffMember(_) => "staff_member",
            OwnedResource::Invoice(_) => "invoice",
        }
    }
}

/// Confirm that `resource` belongs to the context's current school.
pub async fn require_school_ownership(
    db: &PgPool,
    ctx: &AccessContext,
    resource: OwnedResource,
) -> Result<(), GuardError> {
    let owner: Option<SchoolId> = match resource {
        OwnedResource::Student(id) => students::service::find_school_id(db, id).await?,
        OwnedResource::StaffMember(id) => staff::service::find_school_id(db, id).await?,
        OwnedResource::Invoice(id) => invoices::service::find_school_id(db, id).await?,
    };

    match owner {
        Some(school_id) if school_id == ctx.school.id => Ok(()),
        Some(_) => {
            // Cross-school reference. Logged for audit, but the caller
            // sees exactly what a bad id produces.
            warn!(
                user_id = %ctx.user.id,
                school_id = %ctx.school.id,
                domain = resource.domain(),
                "Access denied: resource belongs to another school"
            );
            Err(AccessDenied::not_found(ctx.transport).into())
        }
        None => Err(AccessDenied::not_found(ctx.transport).into()),
    }
}
