//! Principal data model.
//!
//! A [`User`] is read by id (session resolution) or by email (login). The
//! email is the case-insensitive identity key, so [`EmailAddress`] always
//! holds the normalised lowercase form.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PasswordDigest;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id was zero or negative.
    #[error("user id must be a positive integer")]
    NonPositiveId,
    /// The email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Stable user identifier, stored in the session as a 64-bit integer.
///
/// # Examples
/// ```
/// use signin::domain::UserId;
///
/// let id = UserId::new(42).unwrap();
/// assert_eq!(id.get(), 42);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 42)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address normalised for case-insensitive matching.
///
/// ## Invariants
/// - Surrounding whitespace is removed.
/// - The stored value is lowercase and non-empty.
///
/// # Examples
/// ```
/// use signin::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate a raw email string.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored principal.
///
/// The digest never leaves the domain: `User` is not serialisable, adapters
/// render [`User::id`] and [`User::email`] into their own view types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    password_digest: PasswordDigest,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(id: UserId, email: EmailAddress, password_digest: PasswordDigest) -> Self {
        Self {
            id,
            email,
            password_digest,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Verify a submitted secret against the stored digest.
    pub fn authenticate(&self, secret: &str) -> bool {
        self.password_digest.verify(secret)
    }

    /// Stored digest, for persistence adapters.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }
}
