//! Staff module.
//!
//! Staff records for the current school. Distinct from memberships: a
//! staff record is HR data (title, names), while a membership is a login
//! with a role. A staff member may exist without an account.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
