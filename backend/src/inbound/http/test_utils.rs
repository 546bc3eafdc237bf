//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, web};

use super::configure;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::ports::SessionStore;
use crate::domain::{Error, UserId};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie a response set, panicking when absent.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Build an app serving every session route around `state`.
///
/// Adds `GET /test/session` (prints the stored user id, empty when absent)
/// and `GET /test/session/{id}` (stores `id` as the session's user) so tests
/// can inspect and seed sessions without going through the login form.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(configure)
        .route("/test/session", web::get().to(stored_user))
        .route("/test/session/{id}", web::get().to(seed_user))
}

async fn stored_user(session: SessionContext) -> Result<HttpResponse, Error> {
    let id = session.user_id()?.map(|id| id.to_string());
    Ok(HttpResponse::Ok().body(id.unwrap_or_default()))
}

async fn seed_user(session: SessionContext, id: web::Path<i64>) -> Result<HttpResponse, Error> {
    let id = UserId::new(id.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(id)?;
    Ok(HttpResponse::Ok().finish())
}
