//! Per-request resolution of the authenticated principal.
//!
//! A [`SessionGuard`] is built once per request. It reads `user_id` from the
//! session, looks the principal up at most once, and answers the "who is
//! calling" and "may they proceed" questions for the rest of the request.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::ports::{SessionStore, UserRepository};
use super::{Error, FlashMessage, Navigation, RouteTarget, User};

/// Decision returned by [`SessionGuard::require_login`].
#[derive(Debug)]
pub enum Access<'a> {
    /// The request is authenticated; proceed with this principal.
    Granted(&'a User),
    /// The request is anonymous; respond with this navigation instead.
    Denied(Navigation),
}

/// Read-check-redirect gate protecting actions.
///
/// ## Invariants
/// - The principal store is queried at most once per guard.
/// - A session id that no longer resolves reads as "no user", not an error.
///
/// # Examples
/// ```no_run
/// use signin::domain::ports::{SessionStore, UserRepository};
/// use signin::domain::{Access, Error, SessionGuard};
///
/// async fn account<S: SessionStore>(guard: &SessionGuard<S>) -> Result<String, Error> {
///     match guard.require_login().await? {
///         Access::Granted(user) => Ok(user.email().to_string()),
///         Access::Denied(_) => Ok(String::from("redirecting")),
///     }
/// }
/// ```
pub struct SessionGuard<S> {
    session: S,
    users: Arc<dyn UserRepository>,
    current: OnceCell<Option<User>>,
}

impl<S: SessionStore> SessionGuard<S> {
    /// Build an empty guard for one request.
    pub fn new(session: S, users: Arc<dyn UserRepository>) -> Self {
        Self {
            session,
            users,
            current: OnceCell::new(),
        }
    }

    /// Session the guard reads from.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Authenticated principal, or `None` for anonymous or stale sessions.
    pub async fn current_user(&self) -> Result<Option<&User>, Error> {
        let resolved = self
            .current
            .get_or_try_init(|| self.resolve_current_user())
            .await?;
        Ok(resolved.as_ref())
    }

    /// True iff [`SessionGuard::current_user`] yields a principal.
    pub async fn is_logged_in(&self) -> Result<bool, Error> {
        Ok(self.current_user().await?.is_some())
    }

    /// Gate a protected action.
    ///
    /// Anonymous requests are denied with a redirect to the login entry point
    /// carrying a warning flash. Authenticated requests pass with no side
    /// effect.
    pub async fn require_login(&self) -> Result<Access<'_>, Error> {
        match self.current_user().await? {
            Some(user) => Ok(Access::Granted(user)),
            None => Ok(Access::Denied(Navigation::redirect(
                RouteTarget::Login,
                FlashMessage::login_required(),
            ))),
        }
    }

    async fn resolve_current_user(&self) -> Result<Option<User>, Error> {
        let Some(user_id) = self.session.user_id()? else {
            return Ok(None);
        };
        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            debug!(%user_id, "session references a missing user");
        }
        Ok(user)
    }
}
