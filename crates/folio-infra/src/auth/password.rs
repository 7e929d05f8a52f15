//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use folio_core::ports::{AuthError, PasswordService};

/// Argon2id-based password service. Every hash uses a fresh OS-random salt,
/// so two hashes of the same password differ.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Construct with explicit cost parameters (memory KiB, iterations,
    /// parallelism).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(digest).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "p@ssw0rd-123";

        let digest = service.hash(password).unwrap();
        assert!(service.verify(password, &digest).unwrap());
        assert!(!service.verify("wrong_password", &digest).unwrap());
    }

    #[test]
    fn repeated_hashes_use_distinct_salts() {
        let service = Argon2PasswordService::new();
        let password = "same-input";

        let first = service.hash(password).unwrap();
        let second = service.hash(password).unwrap();

        assert_ne!(first, second);
        assert!(service.verify(password, &first).unwrap());
        assert!(service.verify(password, &second).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error_not_a_mismatch() {
        let service = Argon2PasswordService::new();

        assert!(service.verify("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn custom_cost_parameters_still_verify() {
        let service = Argon2PasswordService::with_params(8, 1, 1).unwrap();

        let digest = service.hash("pw").unwrap();
        assert!(service.verify("pw", &digest).unwrap());
    }
}
