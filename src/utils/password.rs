use argon2::password_hash::{rand_core::OsRng, Error, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher};

/// Hashes a plaintext password with a fresh random salt. The work factor
/// comes from the hasher built in `Config::argon2`.
pub fn hash_password(password: &str, argon2: &Argon2<'_>) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(password_hash)
}

/// Recomputes the digest using the salt and parameters embedded in `hash`.
/// A malformed digest verifies as false rather than surfacing an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2<'static> {
        Argon2::default()
    }

    #[test]
    fn hash_is_never_the_plaintext_and_round_trips() {
        let hash = hash_password("Test@1234", &hasher()).unwrap();
        assert_ne!(hash, "Test@1234");
        assert!(verify_password("Test@1234", &hash));
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        let first = hash_password("Test@1234", &hasher()).unwrap();
        let second = hash_password("Test@1234", &hasher()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("Test@1234", &hasher()).unwrap();
        assert!(!verify_password("WrongPassword", &hash));
    }

    #[test]
    fn malformed_digest_verifies_false_instead_of_erroring() {
        assert!(!verify_password("Test@1234", "not-a-phc-string"));
        assert!(!verify_password("Test@1234", ""));
    }
}
