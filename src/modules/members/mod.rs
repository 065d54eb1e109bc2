//! Members module.
//!
//! Administration of who belongs to the current school and with which
//! role. Reachable through either `manage_staff` or `manage_roles`, since
//! both staff admins and role admins work this screen.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
