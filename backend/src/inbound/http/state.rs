//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Verifies submitted credentials.
    pub login: Arc<dyn LoginService>,
    /// Resolves the principal behind a session.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Bundle the ports handlers depend on.
    pub fn new(login: Arc<dyn LoginService>, users: Arc<dyn UserRepository>) -> Self {
        Self { login, users }
    }
}
