/// Password hashing and verification using Argon2id
use crate::config::PasswordSettings;
use crate::error::{CatalogError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Salted one-way credential hasher with a fixed cost
///
/// Holds only the immutable cost parameters, so one instance can be shared
/// by every call.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Build a hasher from configured cost parameters
    ///
    /// ## Errors
    ///
    /// Returns `CatalogError::Internal` if Argon2 rejects the parameters
    /// (for example memory below `8 * parallelism` KiB).
    pub fn new(settings: PasswordSettings) -> Result<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| CatalogError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password using Argon2id
    ///
    /// ## Returns
    ///
    /// PHC-formatted hash string with a fresh random salt, safe for storage
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CatalogError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against its hash
    ///
    /// Uses the parameters embedded in the hash and the verifier's
    /// constant-time comparison. A malformed hash verifies as `false`.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
