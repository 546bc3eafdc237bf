//! View models and the translation of [`Navigation`] into HTTP responses.
//!
//! Views are rendered as JSON. Every rendered view drains the flash queue so
//! a message set before a redirect is shown exactly once.

use actix_web::http::{Method, StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use super::session::SessionContext;
use crate::domain::{Error, FlashMessage, Navigation, RouteTarget, User};

/// Public projection of a principal. The password digest never leaves the
/// domain.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Stable identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Normalised email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            email: user.email().to_string(),
        }
    }
}

/// Login form.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginFormView {
    /// Previously submitted email, empty on first display.
    pub email: String,
    /// Messages queued by the previous request plus any from this one.
    pub flashes: Vec<FlashMessage>,
}

/// Application root.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    /// Logged-in principal, `null` for anonymous sessions.
    pub current_user: Option<UserView>,
    /// Messages queued by the previous request.
    pub flashes: Vec<FlashMessage>,
}

/// Protected account page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// Logged-in principal.
    pub user: UserView,
    /// Messages queued by the previous request.
    pub flashes: Vec<FlashMessage>,
}

/// Status used for a redirect issued while handling `method`.
///
/// `GET` keeps the classic `302 Found`; anything else gets `303 See Other`
/// so the follow-up request is always a `GET`.
pub fn redirect_status(method: &Method) -> StatusCode {
    if method == Method::GET {
        StatusCode::FOUND
    } else {
        StatusCode::SEE_OTHER
    }
}

/// Express a navigation outcome as an HTTP response.
///
/// Redirect flashes are queued in the session for the next view. Form
/// re-renders carry their flash inline, together with anything already
/// queued.
pub fn respond(
    req: &HttpRequest,
    session: &SessionContext,
    navigation: Navigation,
) -> Result<HttpResponse, Error> {
    match navigation {
        Navigation::Redirect { target, flash } => {
            session.push_flash(flash)?;
            Ok(redirect(req.method(), target))
        }
        Navigation::RenderForm { email, flash } => {
            let mut flashes = session.take_flashes();
            flashes.push(flash);
            Ok(HttpResponse::Ok().json(LoginFormView { email, flashes }))
        }
    }
}

fn redirect(method: &Method, target: RouteTarget) -> HttpResponse {
    HttpResponse::build(redirect_status(method))
        .insert_header((header::LOCATION, target.path()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Method::GET, StatusCode::FOUND)]
    #[case(Method::POST, StatusCode::SEE_OTHER)]
    #[case(Method::DELETE, StatusCode::SEE_OTHER)]
    fn redirect_status_depends_on_method(#[case] method: Method, #[case] expected: StatusCode) {
        assert_eq!(redirect_status(&method), expected);
    }

    #[test]
    fn user_view_omits_digest() {
        let user = crate::domain::User::new(
            crate::domain::UserId::new(3).expect("fixture id"),
            crate::domain::EmailAddress::new("Ada@Example.com").expect("fixture email"),
            crate::domain::PasswordDigest::hash("secret").expect("hash"),
        );
        let value = serde_json::to_value(UserView::from(&user)).expect("serialise");
        assert_eq!(value, serde_json::json!({"id": 3, "email": "ada@example.com"}));
    }
}
