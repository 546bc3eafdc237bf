//! Transient user-facing notifications.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    /// The requested action completed.
    Success,
    /// The user must act before continuing.
    Warning,
    /// The requested action failed.
    Danger,
}

/// Message queued for display on the next rendered view.
///
/// # Examples
/// ```
/// use signin::domain::{FlashLevel, FlashMessage};
///
/// let flash = FlashMessage::login_required();
/// assert_eq!(flash.level(), FlashLevel::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    level: FlashLevel,
    #[schema(example = "Logged in.")]
    text: String,
}

impl FlashMessage {
    /// Build a message with an arbitrary level and text.
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Warning queued when a protected action needs a session.
    pub fn login_required() -> Self {
        Self::new(FlashLevel::Warning, "Please log in to continue.")
    }

    /// Success message after a login.
    pub fn logged_in() -> Self {
        Self::new(FlashLevel::Success, "Logged in.")
    }

    /// Failure message for every rejected login, whatever the cause.
    pub fn invalid_credentials() -> Self {
        Self::new(FlashLevel::Danger, "Invalid email or password.")
    }

    /// Success message after a logout.
    pub fn logged_out() -> Self {
        Self::new(FlashLevel::Success, "Logged out.")
    }

    /// Severity.
    pub fn level(&self) -> FlashLevel {
        self.level
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
