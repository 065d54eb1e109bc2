pub mod auth;
pub mod dashboard;
pub mod invoices;
pub mod members;
pub mod roles;
pub mod schools;
pub mod staff;
pub mod students;
