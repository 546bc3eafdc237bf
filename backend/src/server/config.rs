//! HTTP server configuration object.

use signin::inbound::http::session_config::SessionSettings;
use signin::inbound::http::state::HttpState;
use signin::launch::{BindTarget, ThreadBounds};

/// Everything `create_server` needs, gathered during startup.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind: BindTarget,
    pub(crate) threads: ThreadBounds,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Bundle validated launch settings with the handler ports.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind: BindTarget,
        threads: ThreadBounds,
        http_state: HttpState,
    ) -> Self {
        Self {
            session,
            bind,
            threads,
            http_state,
        }
    }
}
