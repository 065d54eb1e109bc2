//! # Schoolhouse Models
//!
//! Shared domain entities for the Schoolhouse API.
//!
//! These are the records the access-control pipeline reads on every
//! request, so they live in their own crate rather than inside a feature
//! module:
//!
//! - [`ids`]: strongly-typed ID newtypes for every entity
//! - [`users`]: authenticated principals
//! - [`schools`]: the tenant boundary every decision is scoped to
//! - [`roles`]: capability bundles and the pure grant logic
//! - [`memberships`]: the user–school–role link
//!
//! Feature-local records (students, staff, invoices, request DTOs) stay in
//! their modules in the application crate.

pub mod ids;
pub mod memberships;
pub mod roles;
pub mod schools;
pub mod users;

// Re-export commonly used types at crate root
pub use ids::{InvoiceId, MembershipId, RoleId, SchoolId, StaffId, StudentId, UserId};
pub use memberships::{Membership, MembershipWithRole};
pub use roles::{CapabilityFlags, Role, SystemRoleType};
pub use schools::School;
pub use users::User;
