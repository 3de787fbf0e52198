//! File-backed tracing setup.
//!
//! The terminal is owned by the interface, so log lines never go to stdout
//! or stderr. Logging stays off unless a log file is requested or the
//! `TOMATIMER_LOG` filter is set.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

pub const LOG_ENV: &str = "TOMATIMER_LOG";
const DEFAULT_FILTER: &str = "info";

/// Where logs should go, if anywhere.
///
/// An explicit path wins. Otherwise a set `TOMATIMER_LOG` enables logging
/// to the default state directory.
pub fn log_target(explicit: Option<&Path>, env_filter: Option<&str>) -> Option<PathBuf> {
    match (explicit, env_filter) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(_)) => AppDirs::log_path(),
        (None, None) => None,
    }
}

/// Installs the global subscriber. Returns the log path when logging is on,
/// or `None` when it is off or another subscriber was already installed.
pub fn init(explicit: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let env_filter = std::env::var(LOG_ENV).ok();
    let Some(path) = log_target(explicit, env_filter.as_deref()) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = env_filter
        .as_deref()
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    match installed {
        Ok(()) => Ok(Some(path)),
        Err(err) => {
            // goes to whichever subscriber is already in place
            warn!(path = %path.display(), %err, "log subscriber already installed");
            Ok(None)
        }
    }
}
