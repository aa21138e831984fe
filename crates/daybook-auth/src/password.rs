//! Password strength policy and Argon2id hashing/verification.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Punctuation that satisfies the special-character rule.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Passwords rejected outright, matched case-insensitively.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "password123",
    "admin",
    "qwerty",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
    "abc123",
    "password1",
    "123456789",
    "welcome123",
    "admin123",
];

// Argon2id work factor (OWASP ASVS: m=19456 KiB, t=2, p=1). Fixed
// tunable constants, not derived per call.
const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params = argon2::Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Check a candidate password against the strength policy.
///
/// Rules are evaluated in order and the first violation wins; its
/// human-readable reason is carried in [`AuthError::WeakPassword`].
pub fn validate_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one uppercase letter".into(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one lowercase letter".into(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one number".into(),
        ));
    }

    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one special character".into(),
        ));
    }

    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        return Err(AuthError::WeakPassword(
            "Password is too common, please choose a stronger password".into(),
        ));
    }

    Ok(())
}

/// Validate the strength policy, then hash with Argon2id and a random
/// salt. A password that fails the policy is never hashed.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_strength(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    // Work-factor parameters come from the PHC string itself.
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_PASSWORD: &str = "Abcdef123456!";

    fn weak_reason(password: &str) -> String {
        match validate_strength(password) {
            Err(AuthError::WeakPassword(reason)) => reason,
            other => panic!("expected WeakPassword, got {other:?}"),
        }
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password(GOOD_PASSWORD).unwrap();
        assert!(verify_password(GOOD_PASSWORD, &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password(GOOD_PASSWORD).unwrap();
        assert!(!verify_password("Wrong123456789!", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        assert!(verify_password(GOOD_PASSWORD, "not-a-hash").is_err());
    }

    #[test]
    fn weak_password_is_never_hashed() {
        assert!(matches!(
            hash_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn too_short_names_the_length_rule() {
        assert!(weak_reason("Ab1!").contains("at least 12 characters"));
    }

    #[test]
    fn missing_uppercase() {
        assert!(weak_reason("abcdef123456!").contains("uppercase"));
    }

    #[test]
    fn missing_lowercase() {
        assert!(weak_reason("ABCDEF123456!").contains("lowercase"));
    }

    #[test]
    fn missing_digit() {
        assert!(weak_reason("Abcdefghijkl!").contains("number"));
    }

    #[test]
    fn missing_special_character() {
        assert!(weak_reason("Abcdef1234567").contains("special character"));
    }

    #[test]
    fn rules_are_checked_in_order() {
        // Violates everything; the length rule is reported first.
        assert!(weak_reason("a").contains("12 characters"));
    }

    #[test]
    fn deny_listed_passwords_are_rejected() {
        for denied in COMMON_PASSWORDS {
            assert!(validate_strength(denied).is_err(), "{denied} accepted");
            // Case variations are no better.
            assert!(validate_strength(&denied.to_uppercase()).is_err());
        }
    }
}
