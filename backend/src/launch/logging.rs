//! Tracing subscriber setup.
//!
//! `WARN` and `ERROR` events go to the stderr target, everything else to the
//! stdout target. Either target may be redirected to a file (opened in append
//! mode). Development logs are human-readable; other environments log JSON.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{EnvFilter, fmt};

use super::LaunchSettings;

const DEFAULT_FILTER: &str = "info";

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Build the writer that splits events between the two targets.
///
/// # Errors
///
/// Returns the I/O error when a log file cannot be opened.
pub fn split_writer(stdout_log: Option<&Path>, stderr_log: Option<&Path>) -> io::Result<BoxMakeWriter> {
    let stdout = match stdout_log {
        Some(path) => BoxMakeWriter::new(Arc::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(io::stdout),
    };
    let stderr = match stderr_log {
        Some(path) => BoxMakeWriter::new(Arc::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(io::stderr),
    };
    Ok(BoxMakeWriter::new(
        stderr.with_max_level(Level::WARN).or_else(stdout),
    ))
}

/// Install the global subscriber described by `settings`.
///
/// The filter honours `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Fails when a log file cannot be opened or a subscriber is already set.
pub fn init_logging(settings: &LaunchSettings) -> io::Result<()> {
    let writer = split_writer(settings.stdout_log.as_deref(), settings.stderr_log.as_deref())?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let to_terminal = settings.stdout_log.is_none() && settings.stderr_log.is_none();
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(to_terminal);

    let result = if settings.is_development() {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
    result.map_err(|error| io::Error::other(format!("tracing init failed: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing::{info, warn};

    #[rstest]
    fn splits_events_by_level() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out_path = dir.path().join("stdout.log");
        let err_path = dir.path().join("stderr.log");

        let writer = split_writer(Some(&out_path), Some(&err_path)).expect("open log files");
        let subscriber = fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            info!("routine event");
            warn!("something odd");
        });

        let out = std::fs::read_to_string(&out_path).expect("read stdout log");
        let err = std::fs::read_to_string(&err_path).expect("read stderr log");
        assert!(out.contains("routine event"));
        assert!(!out.contains("something odd"));
        assert!(err.contains("something odd"));
        assert!(!err.contains("routine event"));
    }

    #[rstest]
    fn appends_to_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out_path = dir.path().join("stdout.log");
        std::fs::write(&out_path, "earlier line\n").expect("seed log");

        let writer = split_writer(Some(&out_path), None).expect("open log file");
        let subscriber = fmt().with_writer(writer).with_ansi(false).finish();
        tracing::subscriber::with_default(subscriber, || info!("later line"));

        let out = std::fs::read_to_string(&out_path).expect("read stdout log");
        assert!(out.starts_with("earlier line\n"));
        assert!(out.contains("later line"));
    }

    #[rstest]
    fn unopenable_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = split_writer(Some(&dir.path().join("absent").join("out.log")), None);
        assert!(result.is_err());
    }
}
