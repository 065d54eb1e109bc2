//! Roles module.
//!
//! Role administration for the current school. Grant mutations are
//! deliberately narrow: permission tokens are granted and revoked one
//! list at a time, flags are set by name, and nothing else ever rewrites
//! a role's grants, so a role's capability set only changes when someone
//! explicitly changes that exact source.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
