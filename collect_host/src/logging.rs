//! Tracing setup
//!
//! The terminal belongs to the editor, so logs only go to a file. Without
//! `--log-file` no subscriber is installed and events are discarded.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::runtime::HostRuntimeError;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "COLLECT_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `log_file`
pub fn init(log_file: Option<&Path>) -> Result<(), HostRuntimeError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = open_log_file(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| HostRuntimeError::LoggingError(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, HostRuntimeError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| HostRuntimeError::LogFileError {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_is_a_no_op() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collect.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
        open_log_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_log_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_log_file(dir.path());
        assert!(matches!(result, Err(HostRuntimeError::LogFileError { .. })));
    }
}
