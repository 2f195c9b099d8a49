//! Password credential handling.
//!
//! Thin Argon2id wrapper. The rest of the engine only ever sees opaque hash
//! strings; plaintext stays inside these two functions.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Credential processing failure. Deliberately opaque.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password processing failed")]
pub struct CredentialError;

/// Hash a plaintext password into an opaque credential handle.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CredentialError)
}

/// Verify a plaintext password against a stored credential handle.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(hash).map_err(|_| CredentialError)?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}
