use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with bcrypt at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Checks a login attempt against the stored hash, if there is an account.
///
/// Without one the password is hashed at the account cost and rejected, so an
/// unknown email takes as long as a wrong password.
pub fn check_credentials(
    password: &str,
    stored_hash: Option<&str>,
    cost: u32,
) -> Result<bool, AppError> {
    match stored_hash {
        Some(hashed) => verify_password(password, hashed),
        None => hash_password(password, cost).map(|_| false),
    }
}
