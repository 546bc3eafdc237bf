//! Port for the per-client session store.
//!
//! The session flow touches exactly one key, the authenticated user id. The
//! methods are synchronous because session stores load the whole session
//! before the handler runs and persist it after the response is built.

use crate::domain::{Error, UserId};

/// Per-client session holding the authenticated user id.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Current user id, or `None` when the client never logged in.
    fn user_id(&self) -> Result<Option<UserId>, Error>;

    /// Record a successful login.
    fn persist_user(&self, user_id: UserId) -> Result<(), Error>;

    /// Drop the user id. Succeeds when no id is present.
    fn forget_user(&self);
}
