//! src/lib.rs
//!
//! Counts the primes below a bound by statically partitioning odd candidates
//! across a fixed number of workers, which run either as threads sharing one
//! address space or as forked processes with isolated memory.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────┐
//!                 │ RunConfig │ (bound, worker_count, mode)
//!                 └─────┬─────┘
//!                       │
//!                       ↓
//!                ┌──────────────┐
//!                │   Executor   │ ←── Mode::Thread | Mode::Process
//!                └──────┬───────┘
//!                       │ one WorkerSpec per unit
//!                       ↓
//!        [Worker 0] [Worker 1] ... [Worker N-1]
//!             │          │               │
//!             │  Partition::iter() → is_prime → count
//!             ↓          ↓               ↓
//!        "<Thread|Process> <id> computed <count> prime numbers in <ms> milliseconds."
//!                       │
//!                       ↓ join all / wait N times
//!               summary line from the caller
//! ```
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          # Public API exports + architecture docs
//! ├── main.rs         # CLI entry point and exit codes
//! ├── config.rs       # RunConfig, Mode, builder and argument validation
//! ├── error.rs        # ConfigError / SpawnError and their exit codes
//! ├── partition.rs    # Round-robin odd-candidate partitioner
//! ├── prime.rs        # Trial-division primality predicate
//! ├── worker.rs       # WorkerSpec, WorkerResult and the per-unit report line
//! └── executor/
//!     ├── mod.rs      # Executor dispatch and the run summary
//!     ├── thread.rs   # Shared-memory strategy (OS threads + join)
//!     └── process.rs  # Isolated-memory strategy (fork + wait)
//! ```
//!
//! # Example Usage
//! ```ignore
//! let config = RunConfig::builder()
//!     .bound(100_000)
//!     .worker_count(4)
//!     .mode(Mode::Thread)
//!     .build();
//!
//! let summary = executor::run(&config)?;
//! println!("{}", summary.line());
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod partition;
pub mod prime;
pub mod worker;

pub use config::{Mode, RunConfig, RunConfigBuilder};
pub use error::{ConfigError, SpawnError};
pub use executor::RunSummary;
pub use partition::Partition;
pub use prime::is_prime;
pub use worker::{UnitKind, WorkerResult, WorkerSpec};
