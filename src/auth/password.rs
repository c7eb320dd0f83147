//! Password hashing
//! Mission: Salted one-way hashes for stored credentials

use anyhow::{Context, Result};
use bcrypt::{hash, verify};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).context("Failed to hash password")
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}
