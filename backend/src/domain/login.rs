//! Password login backed by a principal store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{debug, error};
use zeroize::Zeroizing;

use super::ports::{LoginService, UserRepository};
use super::{Error, LoginCredentials, PasswordDigest, User};

/// [`LoginService`] that looks principals up by email and verifies the
/// submitted secret against their stored digest.
#[derive(Clone)]
pub struct PasswordLoginService {
    users: Arc<dyn UserRepository>,
}

impl PasswordLoginService {
    /// Create a service reading principals from `users`.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for PasswordLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let found = self.users.find_by_email(credentials.email()).await?;
        let digest = found.as_ref().map(|user| user.password_digest().clone());
        let matched = verify_off_runtime(digest, credentials.password()).await?;
        match found {
            Some(user) if matched => Ok(Some(user)),
            Some(user) => {
                debug!(user_id = %user.id(), "password mismatch");
                Ok(None)
            }
            None => {
                debug!("no principal for submitted email");
                Ok(None)
            }
        }
    }
}

/// Run the Argon2 check on the blocking pool so request workers keep
/// serving while it hashes. A missing digest burns a dummy verification.
async fn verify_off_runtime(digest: Option<PasswordDigest>, secret: &str) -> Result<bool, Error> {
    let secret = Zeroizing::new(secret.to_owned());
    task::spawn_blocking(move || match digest {
        Some(digest) => digest.verify(&secret),
        None => PasswordDigest::verify_dummy(&secret),
    })
    .await
    .map_err(|err| {
        error!(error = %err, "password verification task failed");
        Error::internal("password verification failed")
    })
}
