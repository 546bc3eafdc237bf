//! Request extractor that builds a [`SessionGuard`] for each handler call.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, SessionGuard};

/// Guard type handlers take as an argument.
pub type RequestGuard = SessionGuard<SessionContext>;

impl FromRequest for SessionGuard<SessionContext> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let session = session.await?;
            Ok(SessionGuard::new(session, state.users.clone()))
        })
    }
}
