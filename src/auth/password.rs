//! Password hashing with Argon2.

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(argon2::password_hash::Error);

/// Hash `password` into a PHC string with a fresh salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(PasswordError)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("contraseña_segura").unwrap();

        assert_ne!(hash, "contraseña_segura");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("contraseña_segura", &hash).unwrap());
        assert!(!verify_password("otra", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("p").unwrap(), hash_password("p").unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("p", "plaintext").is_err());
    }
}
