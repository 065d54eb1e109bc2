//! Password hashing and verification.
//!
//! Thin wrappers around bcrypt with the default cost factor. Hashes are
//! self-describing strings safe to store directly in the `users` table.

use crate::errors::AppError;
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hash a plaintext password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}
