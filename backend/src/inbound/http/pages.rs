//! Application pages: the public root and the protected account view.

use actix_web::{HttpRequest, HttpResponse, get};

use super::ApiResult;
use super::guard::RequestGuard;
use super::views::{AccountView, HomeView, UserView, respond};
use crate::domain::{Access, Error};

/// Application root. Shows who is logged in, if anyone.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home view", body = HomeView),
        (status = 503, description = "Principal store unavailable", body = Error)
    ),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home(guard: RequestGuard) -> ApiResult<HttpResponse> {
    let current_user = guard.current_user().await?.map(UserView::from);
    Ok(HttpResponse::Ok().json(HomeView {
        current_user,
        flashes: guard.session().take_flashes(),
    }))
}

/// Account page for the logged-in principal.
///
/// Anonymous callers are redirected to `/login` with a warning flash.
#[utoipa::path(
    get,
    path = "/account",
    responses(
        (status = 200, description = "Account view", body = AccountView),
        (status = 302, description = "Login required", headers(
            ("Location" = String, description = "Login entry point")
        )),
        (status = 503, description = "Principal store unavailable", body = Error)
    ),
    tags = ["pages"],
    operation_id = "account",
    security(("SessionCookie" = []))
)]
#[get("/account")]
pub async fn account(req: HttpRequest, guard: RequestGuard) -> ApiResult<HttpResponse> {
    match guard.require_login().await? {
        Access::Granted(user) => Ok(HttpResponse::Ok().json(AccountView {
            user: UserView::from(user),
            flashes: guard.session().take_flashes(),
        })),
        Access::Denied(navigation) => respond(&req, guard.session(), navigation),
    }
}
