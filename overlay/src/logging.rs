//! Subscriber setup shared by the `pulse` shell and the overlay demo
//!
//! `PULSE_LOG_DIR` gets a daily rolling file, `PULSE_LOG_PATH` a single
//! appended file, otherwise stderr. `RUST_LOG` overrides the default level.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;

pub const LOG_DIR_ENV: &str = "PULSE_LOG_DIR";
pub const LOG_PATH_ENV: &str = "PULSE_LOG_PATH";

/// File name prefix inside `PULSE_LOG_DIR`
const ROLLING_PREFIX: &str = "pulse.log";

/// Where log lines end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    RollingDir(PathBuf),
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// A directory wins over a single file. Empty values count as unset.
    pub fn from_vars(dir: Option<String>, path: Option<String>) -> Self {
        let dir = dir.filter(|d| !d.trim().is_empty());
        let path = path.filter(|p| !p.trim().is_empty());
        match (dir, path) {
            (Some(dir), _) => Self::RollingDir(PathBuf::from(dir)),
            (None, Some(path)) => Self::File(PathBuf::from(path)),
            (None, None) => Self::Stderr,
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(env::var(LOG_DIR_ENV).ok(), env::var(LOG_PATH_ENV).ok())
    }
}

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// The returned guard flushes the rolling writer and must live until exit.
pub fn init_logging(default_level: Level) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    match LogTarget::from_env() {
        LogTarget::RollingDir(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, ROLLING_PREFIX));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file)
                    .init();
                None
            }
            Err(e) => {
                init_stderr(filter);
                tracing::warn!(path = %path.display(), error = %e, "Cannot open log file, using stderr");
                None
            }
        },
        LogTarget::Stderr => {
            init_stderr(filter);
            None
        }
    }
}

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}
