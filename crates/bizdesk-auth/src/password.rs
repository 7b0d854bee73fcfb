//! Argon2id password verification.

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// The pepper, when configured, is prepended to the password and must
/// match the one used at hashing time.
///
/// Returns `Ok(false)` on mismatch and `Err(AuthError::Crypto)` if the
/// stored hash cannot be parsed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let input = match pepper {
        Some(p) => format!("{p}{password}"),
        None => password.to_owned(),
    };

    match Argon2::default().verify_password(input.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing failed")
            .to_string()
    }

    #[test]
    fn matching_password_verifies() {
        let stored = hash("open-sesame");
        assert!(verify_password("open-sesame", &stored, None).unwrap());
        assert!(!verify_password("open-sesam", &stored, None).unwrap());
    }

    #[test]
    fn pepper_is_prepended() {
        let stored = hash("spice!open-sesame");
        assert!(verify_password("open-sesame", &stored, Some("spice!")).unwrap());
        assert!(!verify_password("open-sesame", &stored, None).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("pw", "plaintext", None),
            Err(AuthError::Crypto(_))
        ));
    }
}
