//! # Schoolhouse Core
//!
//! Core types, errors, and utilities for the Schoolhouse API.
//!
//! This crate provides foundational types used throughout the Schoolhouse application:
//!
//! - [`capabilities`]: the closed capability vocabulary that permission
//!   decisions are expressed in
//! - [`errors`]: application error types with HTTP response conversion
//! - [`pagination`]: pagination utilities for API responses
//! - [`password`]: secure password hashing and verification
//! - [`serde`]: custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use schoolhouse_core::capabilities::Capability;
//! use schoolhouse_core::errors::AppError;
//! use schoolhouse_core::password::{hash_password, verify_password};
//!
//! let cap = Capability::from_token("manage_students");
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod capabilities;
pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use capabilities::{Capability, WILDCARD};
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
