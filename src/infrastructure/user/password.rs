//! Password hashing capability backed by Argon2

use std::fmt::Debug;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::domain::DomainError;

/// Hashing capability consumed by the user service.
///
/// Digests are opaque to the rest of the system: passwords are only ever
/// compared through [`verify`](PasswordHasher::verify).
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hashes a password into an opaque digest.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a password against a digest. Never fails: returns false on
    /// any mismatch or malformed digest.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based password hasher with per-digest random salts.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("hash password: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(hash) => hash,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
