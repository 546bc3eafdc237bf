//! Password digests stored alongside principals.
//!
//! Digests are Argon2 PHC strings (`$argon2id$v=19$...`). Hashing exists for
//! the `hash-password` tool and tests; the login path only verifies.

use std::fmt;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

const SALT_BYTES: usize = 16;

/// Digest verified when the submitted email matches no principal, so unknown
/// and known emails cost one verification each. Its parameters must match
/// `Argon2::default()`; no secret verifies against it.
const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$jdm1eZSJ2h/vIqm6atqBQw$yEb3JMIMK6V16O+2S5nG0meoW72XOS1uGcB/NdVoyl8";

/// Errors raised while parsing or producing digests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The stored value is not a PHC string.
    #[error("password digest is not a valid PHC string: {message}")]
    Malformed { message: String },
    /// Salt generation or hashing failed.
    #[error("failed to hash password: {message}")]
    Hashing { message: String },
}

/// Argon2 PHC digest of a principal's secret.
///
/// # Examples
/// ```
/// use signin::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash("s3cret").unwrap();
/// assert!(digest.verify("s3cret"));
/// assert!(!digest.verify("S3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Validate a stored PHC string.
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordDigestError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|err| PasswordDigestError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Hash a secret with default Argon2id parameters and a random salt.
    pub fn hash(secret: &str) -> Result<Self, PasswordDigestError> {
        let mut salt_bytes = [0_u8; SALT_BYTES];
        getrandom::getrandom(&mut salt_bytes).map_err(|err| PasswordDigestError::Hashing {
            message: err.to_string(),
        })?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| {
            PasswordDigestError::Hashing {
                message: err.to_string(),
            }
        })?;
        let phc = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hashing {
                message: err.to_string(),
            })?
            .to_string();
        Ok(Self(phc))
    }

    /// Check `secret` against the digest. Malformed digests never verify.
    pub fn verify(&self, secret: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Burn one verification against a fixed digest. Always false.
    pub fn verify_dummy(secret: &str) -> bool {
        let _ = Self(DUMMY_PHC.to_owned()).verify(secret);
        false
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
