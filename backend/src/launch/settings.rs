//! Process launch settings loaded via OrthoConfig.
//!
//! Every value is read from an `APP_`-prefixed environment variable (or the
//! matching `--kebab-case` flag) and falls back to a default when absent.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::bind::{BindError, BindTarget};

const DEFAULT_MAX_THREADS: usize = 5;
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_BIND: &str = "unix:///var/run/signin/signin.sock";
const DEFAULT_PIDFILE: &str = "/var/run/signin/server.pid";

/// Errors raised while validating launch settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// Thread counts must be positive.
    #[error("thread counts must be at least 1 (min={min}, max={max})")]
    ZeroThreads { min: usize, max: usize },
    /// The minimum exceeds the maximum.
    #[error("APP_MIN_THREADS ({min}) must not exceed APP_MAX_THREADS ({max})")]
    InvertedThreads { min: usize, max: usize },
    /// `APP_BIND` could not be parsed.
    #[error("invalid APP_BIND: {0}")]
    Bind(#[from] BindError),
}

/// Raw launch configuration.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct LaunchSettings {
    /// Upper bound of the request worker pool.
    pub max_threads: Option<usize>,
    /// Lower bound of the request worker pool; defaults to the maximum.
    pub min_threads: Option<usize>,
    /// Deployment environment name.
    pub environment: Option<String>,
    /// Listener address.
    pub bind: Option<String>,
    /// PID file path.
    pub pidfile: Option<PathBuf>,
    /// Append standard log output to this file instead of stdout.
    pub stdout_log: Option<PathBuf>,
    /// Append warnings and errors to this file instead of stderr.
    pub stderr_log: Option<PathBuf>,
    /// JSON seed file for the in-memory principal store.
    pub users_file: Option<PathBuf>,
    /// PostgreSQL URL; when set the Diesel store replaces the in-memory one.
    pub database_url: Option<String>,
}

/// Validated worker pool bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadBounds {
    /// Minimum workers.
    pub min: usize,
    /// Maximum workers.
    pub max: usize,
}

impl LaunchSettings {
    /// Configured maximum thread count, defaulting to 5.
    pub fn max_threads(&self) -> usize {
        self.max_threads.unwrap_or(DEFAULT_MAX_THREADS)
    }

    /// Configured minimum thread count, defaulting to the maximum.
    pub fn min_threads(&self) -> usize {
        self.min_threads.unwrap_or_else(|| self.max_threads())
    }

    /// Validate `1 <= min <= max`.
    ///
    /// # Errors
    ///
    /// See [`LaunchError::ZeroThreads`] and [`LaunchError::InvertedThreads`].
    pub fn thread_bounds(&self) -> Result<ThreadBounds, LaunchError> {
        let (min, max) = (self.min_threads(), self.max_threads());
        if min == 0 || max == 0 {
            return Err(LaunchError::ZeroThreads { min, max });
        }
        if min > max {
            return Err(LaunchError::InvertedThreads { min, max });
        }
        Ok(ThreadBounds { min, max })
    }

    /// Deployment environment, defaulting to `development`.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// True when running in the `development` environment.
    pub fn is_development(&self) -> bool {
        self.environment() == DEFAULT_ENVIRONMENT
    }

    /// Parsed listener address, defaulting to the Unix socket.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Bind`] for malformed addresses.
    pub fn bind_target(&self) -> Result<BindTarget, LaunchError> {
        Ok(self.bind.as_deref().unwrap_or(DEFAULT_BIND).parse()?)
    }

    /// PID file path, defaulting to `/var/run/signin/server.pid`.
    pub fn pidfile(&self) -> &Path {
        self.pidfile
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PIDFILE))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for launch configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "APP_MAX_THREADS",
        "APP_MIN_THREADS",
        "APP_ENVIRONMENT",
        "APP_BIND",
        "APP_PIDFILE",
        "APP_STDOUT_LOG",
        "APP_STDERR_LOG",
        "APP_USERS_FILE",
        "APP_DATABASE_URL",
    ];

    fn load_from_empty_args() -> LaunchSettings {
        LaunchSettings::load_from_iter([OsString::from("signin")]).expect("config should load")
    }

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.thread_bounds(),
            Ok(ThreadBounds { min: 5, max: 5 })
        );
        assert_eq!(settings.environment(), "development");
        assert!(settings.is_development());
        assert_eq!(
            settings.bind_target(),
            Ok(BindTarget::Unix(PathBuf::from("/var/run/signin/signin.sock")))
        );
        assert_eq!(settings.pidfile(), Path::new("/var/run/signin/server.pid"));
        assert!(settings.stdout_log.is_none());
        assert!(settings.stderr_log.is_none());
        assert!(settings.users_file.is_none());
        assert!(settings.database_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("APP_MAX_THREADS", "16"),
            ("APP_MIN_THREADS", "2"),
            ("APP_ENVIRONMENT", "production"),
            ("APP_BIND", "tcp://127.0.0.1:9292"),
            ("APP_PIDFILE", "/tmp/signin.pid"),
            ("APP_STDOUT_LOG", "/tmp/signin.stdout.log"),
            ("APP_USERS_FILE", "/etc/signin/users.json"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.thread_bounds(),
            Ok(ThreadBounds { min: 2, max: 16 })
        );
        assert!(!settings.is_development());
        assert_eq!(
            settings.bind_target(),
            Ok(BindTarget::Tcp {
                host: "127.0.0.1".into(),
                port: 9292
            })
        );
        assert_eq!(settings.pidfile(), Path::new("/tmp/signin.pid"));
        assert_eq!(
            settings.stdout_log.as_deref(),
            Some(Path::new("/tmp/signin.stdout.log"))
        );
        assert_eq!(
            settings.users_file.as_deref(),
            Some(Path::new("/etc/signin/users.json"))
        );
    }

    #[rstest]
    fn min_threads_follow_max_when_unset() {
        let _guard = lock_env(env_with(&[("APP_MAX_THREADS", "8")]));
        let settings = load_from_empty_args();
        assert_eq!(settings.thread_bounds(), Ok(ThreadBounds { min: 8, max: 8 }));
    }

    #[rstest]
    #[case(Some(0), None, LaunchError::ZeroThreads { min: 0, max: 0 })]
    #[case(Some(4), Some(0), LaunchError::ZeroThreads { min: 0, max: 4 })]
    #[case(Some(2), Some(3), LaunchError::InvertedThreads { min: 3, max: 2 })]
    fn invalid_thread_bounds_are_rejected(
        #[case] max: Option<usize>,
        #[case] min: Option<usize>,
        #[case] expected: LaunchError,
    ) {
        let settings = LaunchSettings {
            max_threads: max,
            min_threads: min,
            ..LaunchSettings::default()
        };
        assert_eq!(settings.thread_bounds(), Err(expected));
    }

    #[rstest]
    fn malformed_bind_is_reported() {
        let settings = LaunchSettings {
            bind: Some("nowhere".into()),
            ..LaunchSettings::default()
        };
        assert!(matches!(settings.bind_target(), Err(LaunchError::Bind(_))));
    }
}
