//! src/config.rs
//!
//! Configuration for a prime-counting run.
//!
//! The `RunConfig` struct stores the three parameters that control a run: the
//! exclusive upper bound, how many workers share the candidates, and whether
//! those workers are threads or processes.
//!
//! Example:
//! ```ignore
//! let config = RunConfig::builder()
//!     .bound(1_000_000)
//!     .worker_count(8)
//!     .mode(Mode::Process)
//!     .build();
//! ```
//!
//! Command-line input goes through [`RunConfig::from_args`], which validates
//! the arguments in order and reports the first failure.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How worker units are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Shared-memory: OS threads inside this process, joined at the end.
    #[default]
    Thread,
    /// Isolated-memory: forked child processes, reaped with wait-for-any.
    Process,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Thread => "thread",
            Mode::Process => "process",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thread" => Ok(Mode::Thread),
            "process" => Ok(Mode::Process),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Exclusive upper limit below which primes are counted
    pub bound: u64,
    /// Number of worker units (0 = nothing is spawned)
    pub worker_count: usize,
    /// Threads or processes
    pub mode: Mode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bound: 0,
            worker_count: 1,
            mode: Mode::Thread,
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Validates raw command-line arguments.
    ///
    /// Checked in argument order, so a bad bound is reported even when the
    /// worker count and mode are also bad.
    pub fn from_args(bound: &str, worker_count: &str, mode: &str) -> Result<Self, ConfigError> {
        let bound = bound
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidBound(bound.to_string()))?;
        let worker_count = worker_count
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidWorkerCount(worker_count.to_string()))?;
        let mode = mode.parse::<Mode>()?;

        Ok(Self {
            bound,
            worker_count,
            mode,
        })
    }
}

/// Builder for RunConfig with method chaining
#[derive(Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Set the exclusive upper bound
    pub fn bound(mut self, bound: u64) -> Self {
        self.config.bound = bound;
        self
    }

    /// Set the number of workers
    pub fn worker_count(mut self, workers: usize) -> Self {
        self.config.worker_count = workers;
        self
    }

    /// Set the execution mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> RunConfig {
        self.config
    }
}
