//! Driving port for credential checks.
//!
//! Inbound adapters call it without knowing which store backs the principals,
//! so HTTP tests can substitute a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the principal when the credentials match, `None` otherwise.
    ///
    /// Unknown email and wrong secret both yield `Ok(None)`. Only store
    /// failures are errors.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error>;
}
