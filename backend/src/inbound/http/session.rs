//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so the domain sees a [`SessionStore`] holding a
//! typed user id, and so handlers can queue and drain flash messages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::SessionStore;
use crate::domain::{Error, FlashMessage, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "_flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a flash message for the next rendered view.
    pub fn push_flash(&self, flash: FlashMessage) -> Result<(), Error> {
        let mut queued = self.peek_flashes();
        queued.push(flash);
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to queue flash: {error}")))
    }

    /// Remove and return every queued flash message.
    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        match self.0.remove_as::<Vec<FlashMessage>>(FLASH_KEY) {
            Some(Ok(flashes)) => flashes,
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding undecodable flash queue");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn peek_flashes(&self) -> Vec<FlashMessage> {
        self.0
            .get::<Vec<FlashMessage>>(FLASH_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl SessionStore for SessionContext {
    fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = match self.0.get::<i64>(USER_ID_KEY) {
            Ok(raw) => raw,
            Err(error) => {
                warn!("undecodable user id in session cookie: {error}");
                return Ok(None);
            }
        };
        match raw.map(UserId::new).transpose() {
            Ok(id) => Ok(id),
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                Ok(None)
            }
        }
    }

    fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        // A fresh session identity on privilege change.
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn forget_user(&self) {
        self.0.remove(USER_ID_KEY);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
