//! Password hashing with bcrypt. The salt is generated per hash.

use crate::error::AppError;

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::validation("password cannot be empty"));
    }
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("failed to verify password: {e}")))
}
