//! Session authentication backend: a login/logout flow and per-request
//! current-user resolution over cookie sessions.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod launch;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
