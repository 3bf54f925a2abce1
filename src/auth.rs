//! Organizer password hashing.

use crate::error::OrganizerError;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::SaltString;
use rand::rngs::OsRng;

/// Hash a password into a PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, OrganizerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| OrganizerError::validation(format!("Unusable password: {e}")))
}

/// False for a wrong password and for an unparsable stored hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is unreadable: {e}");
            false
        }
    }
}
