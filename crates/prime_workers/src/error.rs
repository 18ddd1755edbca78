//! src/error.rs
//!
//! Typed failures that decide the process exit code.
//!
//! Everything else travels as `anyhow::Error`; `main` downcasts to these types
//! to pick a code.

use std::io;
use thiserror::Error;

/// Exit code for a usage error (wrong number of arguments).
pub const EXIT_USAGE: i32 = 1;

/// Rejected command-line input. Detected before any worker is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("1st argument (bound) must be a non-negative integer, got '{0}'")]
    InvalidBound(String),

    #[error("2nd argument (worker_count) must be a non-negative integer, got '{0}'")]
    InvalidWorkerCount(String),

    #[error("3rd argument must be either \"process\" or \"thread\", got '{0}'")]
    InvalidMode(String),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::InvalidBound(_) => 2,
            ConfigError::InvalidWorkerCount(_) => 3,
            ConfigError::InvalidMode(_) => 4,
        }
    }
}

/// A worker unit could not be created.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("can not create thread for worker {worker_id}")]
    Thread {
        worker_id: usize,
        #[source]
        source: io::Error,
    },

    #[error("can not fork process for worker {worker_id}")]
    Process {
        worker_id: usize,
        #[source]
        source: io::Error,
    },
}

impl SpawnError {
    pub fn worker_id(&self) -> usize {
        match self {
            SpawnError::Thread { worker_id, .. } | SpawnError::Process { worker_id, .. } => {
                *worker_id
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            SpawnError::Thread { .. } => 5,
            SpawnError::Process { .. } => 6,
        }
    }
}

/// Maps any error surfaced by a run to its exit code.
///
/// Errors that are neither a [`ConfigError`] nor a [`SpawnError`] are
/// unexpected runtime failures and map to 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        return config_err.exit_code();
    }
    if let Some(spawn_err) = err.downcast_ref::<SpawnError>() {
        return spawn_err.exit_code();
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_have_distinct_codes() {
        assert_eq!(ConfigError::InvalidBound("x".into()).exit_code(), 2);
        assert_eq!(ConfigError::InvalidWorkerCount("-1".into()).exit_code(), 3);
        assert_eq!(ConfigError::InvalidMode("fiber".into()).exit_code(), 4);
    }

    #[test]
    fn spawn_errors_differ_by_strategy() {
        let thread = SpawnError::Thread {
            worker_id: 2,
            source: io::Error::from(io::ErrorKind::OutOfMemory),
        };
        let process = SpawnError::Process {
            worker_id: 3,
            source: io::Error::from(io::ErrorKind::WouldBlock),
        };
        assert_eq!(thread.worker_id(), 2);
        assert_eq!(process.worker_id(), 3);
        assert_ne!(thread.exit_code(), process.exit_code());
        assert_ne!(thread.exit_code(), 0);
    }

    #[test]
    fn exit_code_survives_context() {
        let err = anyhow::Error::new(ConfigError::InvalidMode("fiber".into()))
            .context("while validating arguments");
        assert_eq!(exit_code_for(&err), 4);
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), 1);
    }
}
