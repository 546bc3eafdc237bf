//! Process launch: settings, listener address, PID file, and logging.

pub mod bind;
pub mod logging;
pub mod pidfile;
pub mod settings;

pub use bind::{BindError, BindTarget};
pub use logging::init_logging;
pub use pidfile::PidFile;
pub use settings::{LaunchError, LaunchSettings, ThreadBounds};
