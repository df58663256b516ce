//! Argon2 password hashing.
//!
//! Hashes are PHC strings with the salt embedded, so every call to [`hash`]
//! yields a different string for the same password. Comparison goes through
//! [`PasswordVerifier`], never string equality.
use super::*;
use apic_core::SALT_BYTES;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> Result<SaltString, AuthError> {
    use rand::Rng;
    let ref mut bytes = [0u8; SALT_BYTES];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn hash(password: &str) -> Result<String, AuthError> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// True only if `hashword` parses and matches `password`.
/// A malformed stored hash is a mismatch, not an error.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .inspect_err(|_| log::warn!("stored password hash is malformed"))
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_source() {
        let hashword = hash("correct horse").unwrap();
        assert!(verify("correct horse", &hashword));
        assert!(!verify("battery staple", &hashword));
    }

    #[test]
    fn salts_differ_between_calls() {
        let a = hash("secret").unwrap();
        let b = hash("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify("secret", &a));
        assert!(verify("secret", &b));
    }

    #[test]
    fn hash_is_not_plaintext() {
        let hashword = hash("secret").unwrap();
        assert!(hashword.starts_with("$argon2"));
        assert!(!hashword.contains("secret"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify("secret", "secret"));
        assert!(!verify("", ""));
    }
}
