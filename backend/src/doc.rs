//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the session routes, the pages, and the health
//! probes together with their view schemas. The document is exported by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, FlashLevel, FlashMessage};
use crate::inbound::http::health::{ProbeBody, ProbeStatus};
use crate::inbound::http::sessions::LoginForm;
use crate::inbound::http::views::{AccountView, HomeView, LoginFormView, UserView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "signin",
        description = "Session login, logout, and current-user resolution.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::sessions::new_session,
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::destroy_session,
        crate::inbound::http::pages::home,
        crate::inbound::http::pages::account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginForm,
        LoginFormView,
        HomeView,
        AccountView,
        UserView,
        FlashMessage,
        FlashLevel,
        ProbeBody,
        ProbeStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "sessions", description = "Login and logout"),
        (name = "pages", description = "Views that depend on the current user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
