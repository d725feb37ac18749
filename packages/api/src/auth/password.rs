//! # Password hashing and verification
//!
//! Credentials go through the [`CredentialHasher`] capability so account flows never
//! compare passwords directly. Two implementations:
//!
//! - [`Argon2Hasher`]: the default. [`hash`](CredentialHasher::hash) generates a
//!   random salt via [`OsRng`] and returns a PHC-format string
//!   (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`), which is what lands in the
//!   `password` field of a stored user. [`verify`](CredentialHasher::verify) parses
//!   that string and checks the candidate.
//! - [`PlaintextHasher`]: stores and compares the raw string. It reads and writes
//!   the same records as older plaintext data, at the cost of keeping passwords in
//!   clear text.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("invalid password hash: {0}")]
    InvalidHash(String),
}

/// Turns a password into its stored form and checks candidates against it.
pub trait CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, HashError>;
    /// `Ok(false)` on mismatch; `Err` only when `stored` cannot be interpreted.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, HashError>;
}

/// Argon2id with the crate's default parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(stored).map_err(|e| HashError::InvalidHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Exact string comparison against a plaintext stored password.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextHasher;

impl CredentialHasher for PlaintextHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, HashError> {
        Ok(password == stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_hash_and_verify() {
        let hasher = Argon2Hasher;
        let stored = hasher.hash("gizli123").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert_ne!(stored, "gizli123");
        assert!(hasher.verify("gizli123", &stored).unwrap());
        assert!(!hasher.verify("gizli124", &stored).unwrap());
    }

    #[test]
    fn test_argon2_salts_differ() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("aynı").unwrap(), hasher.hash("aynı").unwrap());
    }

    #[test]
    fn test_argon2_rejects_plaintext_record() {
        assert!(matches!(
            Argon2Hasher.verify("gizli123", "gizli123"),
            Err(HashError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_plaintext_compares_exactly() {
        let hasher = PlaintextHasher;
        let stored = hasher.hash("Gizli").unwrap();
        assert_eq!(stored, "Gizli");
        assert!(hasher.verify("Gizli", &stored).unwrap());
        assert!(!hasher.verify("gizli", &stored).unwrap());
    }
}
