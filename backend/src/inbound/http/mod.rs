//! HTTP inbound adapter exposing the session routes.

pub mod error;
pub mod guard;
pub mod health;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register the login, logout, and page routes.
///
/// Callers must wrap the app in a session middleware and register a
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(signin::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sessions::new_session)
        .service(sessions::create_session)
        .service(sessions::destroy_session)
        .service(pages::home)
        .service(pages::account);
}
