//! Password hashing primitives
//!
//! Salted one-way hashing with argon2. Only the digest ever crosses the
//! store boundary; plaintext passwords are never persisted or logged.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plaintext password with a freshly generated random salt
///
/// The cost parameters are the argon2 defaults, fixed across the system.
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let digest = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(digest)
}

/// Verify a plaintext password against a stored digest
///
/// Returns `Ok(false)` for a non-matching password; fails only when the
/// stored digest itself is malformed.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(digest)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(plaintext.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("secreto123").expect("Failed to hash password");

        assert!(verify_password("secreto123", &digest).expect("Failed to verify"));
        assert!(!verify_password("otracosa", &digest).expect("Failed to verify"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("secreto123").expect("Failed to hash password");
        let b = hash_password("secreto123").expect("Failed to hash password");

        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        assert!(verify_password("secreto123", "not-a-digest").is_err());
    }
}
