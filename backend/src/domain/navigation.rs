//! Explicit outcomes of the session handlers.
//!
//! Handlers never write transport responses. They return a [`Navigation`]
//! and the inbound adapter decides how to express it (status code, headers,
//! body).

use super::FlashMessage;

/// Named destinations the session flow can send a client to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// The login entry point.
    Login,
    /// The application root.
    Root,
}

impl RouteTarget {
    /// Path the target is mounted at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Root => "/",
        }
    }
}

/// Result of a login, logout, or guard decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Send the client elsewhere.
    Redirect {
        /// Where the client goes next.
        target: RouteTarget,
        /// Shown by the next rendered view.
        flash: FlashMessage,
    },
    /// Show the login form again in this response.
    RenderForm {
        /// Submitted email, echoed back so the user need not retype it.
        email: String,
        /// Shown inline with the form.
        flash: FlashMessage,
    },
}

impl Navigation {
    /// Redirect carrying a flash message.
    pub fn redirect(target: RouteTarget, flash: FlashMessage) -> Self {
        Self::Redirect { target, flash }
    }

    /// True for [`Navigation::Redirect`].
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}
