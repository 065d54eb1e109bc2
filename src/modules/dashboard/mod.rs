//! Dashboard module.
//!
//! The landing surface after selecting a school. Also the redirect target
//! for in-school denials, so it must render for any member regardless of
//! capabilities.

pub mod controller;
pub mod model;
pub mod router;
