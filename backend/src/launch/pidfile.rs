//! PID file written at startup and removed on shutdown.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Guard owning a PID file. Dropping it removes the file.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Write the current process id to `path`, replacing any stale file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the file cannot be written.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        std::fs::write(&path, format!("{}\n", std::process::id()))?;
        debug!(path = %path.display(), "wrote pid file");
        Ok(Self { path })
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed pid file"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => warn!(path = %self.path.display(), %error, "failed to remove pid file"),
        }
    }
}
