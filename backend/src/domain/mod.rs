//! Domain primitives, ports, and session use-cases.
//!
//! Purpose: keep authentication decisions free of transport and storage
//! concerns. Inbound adapters feed raw inputs in and turn [`Navigation`]
//! outcomes into responses; outbound adapters implement the [`ports`].
//!
//! Public surface:
//! - [`SessionGuard`]: per-request current-user resolution and login gate.
//! - [`attempt_login`] / [`logout`]: session-mutating use-cases.
//! - [`PasswordLoginService`]: store-backed [`ports::LoginService`].
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod auth;
pub mod error;
pub mod flash;
pub mod login;
pub mod navigation;
pub mod password;
pub mod ports;
pub mod session_flow;
pub mod session_guard;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::flash::{FlashLevel, FlashMessage};
pub use self::login::PasswordLoginService;
pub use self::navigation::{Navigation, RouteTarget};
pub use self::password::{PasswordDigest, PasswordDigestError};
pub use self::session_flow::{attempt_login, logout};
pub use self::session_guard::{Access, SessionGuard};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserId, UserValidationError};
