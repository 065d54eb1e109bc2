//! # Schoolhouse Auth
//!
//! Authentication types and JWT utilities for the Schoolhouse API.
//!
//! This crate provides:
//!
//! - [`claims`]: access-token claim structure
//! - [`jwt`]: token creation and verification utilities
//!
//! Access tokens carry identity only: user id, email, and the superuser
//! flag. They deliberately do NOT embed roles or permissions: school
//! membership and role state are re-read from storage on every permission
//! evaluation, so an admin's edit to a role takes effect on the very next
//! request instead of waiting for tokens to expire.
//!
//! # Example
//!
//! ```ignore
//! use schoolhouse_auth::{create_access_token, verify_token};
//! use schoolhouse_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", false, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
