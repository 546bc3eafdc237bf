//! Login and logout handlers.
//!
//! ```text
//! GET    /login                      login form
//! POST   /login   session[email]=..&session[password]=..
//! DELETE /logout                     (POST accepted for HTML forms)
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, route, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{LoginFormView, respond};
use crate::domain::{Error, attempt_login, logout};

/// Form body for `POST /login`, nested under `session[...]` keys.
///
/// Missing fields read as empty and are rejected like any other bad
/// credentials.
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    /// Email as typed; matched case-insensitively.
    #[serde(rename = "session[email]", default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Secret checked against the stored digest.
    #[serde(rename = "session[password]", default)]
    #[schema(format = Password)]
    pub password: String,
}

/// Show the login form, draining any queued flash messages.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login form", body = LoginFormView)
    ),
    tags = ["sessions"],
    operation_id = "newSession",
    security([])
)]
#[get("/login")]
pub async fn new_session(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(LoginFormView {
        email: String::new(),
        flashes: session.take_flashes(),
    })
}

/// Verify credentials and establish a session.
///
/// Success redirects to the application root. Any rejection re-renders the
/// form with the same message so callers cannot probe which emails exist.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in", headers(
            ("Location" = String, description = "Application root"),
            ("Set-Cookie" = String, description = "Session cookie")
        )),
        (status = 200, description = "Credentials rejected", body = LoginFormView),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Principal store unavailable", body = Error)
    ),
    tags = ["sessions"],
    operation_id = "createSession",
    security([])
)]
#[post("/login")]
pub async fn create_session(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { email, password } = form.into_inner();
    let password = Zeroizing::new(password);
    let navigation = attempt_login(state.login.as_ref(), &session, &email, &password).await?;
    respond(&req, &session, navigation)
}

/// Clear the session's principal. Safe to call when already logged out.
#[utoipa::path(
    method(delete, post),
    path = "/logout",
    responses(
        (status = 303, description = "Logged out", headers(
            ("Location" = String, description = "Application root")
        ))
    ),
    tags = ["sessions"],
    operation_id = "destroySession",
    security([])
)]
#[route("/logout", method = "DELETE", method = "POST")]
pub async fn destroy_session(req: HttpRequest, session: SessionContext) -> ApiResult<HttpResponse> {
    let navigation = logout(&session);
    respond(&req, &session, navigation)
}
