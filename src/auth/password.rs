// Password hashing with argon2
// Each hash carries its own random salt and the fixed cost parameters, so
// verification needs nothing beyond the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password hashing and verification service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a freshly generated salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` for a wrong password; `Err` only for a hash that
    /// cannot be parsed at all.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = PasswordService::hash_password("correct horse battery").unwrap();
        assert!(PasswordService::verify_password("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = PasswordService::hash_password("123456").unwrap();
        assert!(!PasswordService::verify_password("654321", &hash).unwrap());
    }

    #[test]
    fn test_salts_are_randomized() {
        // Same password, different salt, different hash string.
        let first = PasswordService::hash_password("123456").unwrap();
        let second = PasswordService::hash_password("123456").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(PasswordService::verify_password("pw", "not-a-phc-string").is_err());
    }
}
