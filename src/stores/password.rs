use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::errors::InternalError;

/// Hash a plaintext password with Argon2id.
pub(crate) fn hash(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| InternalError::crypto("password hashing", e.to_string()))
}

/// Verify a plaintext password against a stored digest.
pub(crate) fn verify(password: &str, digest: &str) -> Result<bool, InternalError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| InternalError::crypto("password hash parsing", e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
