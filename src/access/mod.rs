//! Per-request access control.
//!
//! Authorization runs as an ordered pipeline in front of every protected
//! handler:
//!
//! ```text
//! AUTH (bearer token) -> SCHOOL RESOLUTION -> MEMBERSHIP -> CAPABILITY
//! ```
//!
//! - [`resolver`] finds the current school and the user's membership in it;
//! - [`context`] holds the result as an explicit per-request value and
//!   hosts the pure capability evaluation;
//! - [`guard`] exposes the pipeline as predicates and axum extractors;
//! - [`ownership`] confirms record-level school ownership;
//! - [`outcome`] turns every refusal into a transport-appropriate response.
//!
//! Denials are values, not errors: they never unwind past the guard, and
//! the protected operation is never entered. Only storage failures
//! propagate, as 500s.

pub mod context;
pub mod guard;
pub mod outcome;
pub mod ownership;
pub mod resolver;

pub use context::AccessContext;
pub use outcome::{AccessDenied, DenyKind, GuardError, TransportHint};
