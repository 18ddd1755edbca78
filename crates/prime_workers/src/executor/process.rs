//! src/executor/process.rs
//!
//! Isolated-memory strategy: one forked child per worker.
//!
//! Each child starts from a copy of the parent's memory, runs its worker,
//! prints its own report line and exits. Nothing is sent back to the parent
//! except the exit status. The parent calls `wait` exactly once per child it
//! forked and accepts the children in whatever order they finish.
//!
//! # Spawn failure
//! If `fork` fails, the children that were already forked are reaped before
//! the `SpawnError` is returned.
//!
//! # Safety
//! `fork` is only sound when no other thread holds a lock the child needs. The
//! binary is single-threaded when it forks. Library callers that fork from a
//! multi-threaded process take on that constraint themselves.

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::sys::wait::{wait, WaitStatus};
use nix::unistd::{fork, ForkResult};
use std::io::{self, Write};

use crate::error::SpawnError;
use crate::worker::{UnitKind, WorkerSpec};

/// How one child left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    pub pid: i32,
    /// Exit code, or `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl ChildExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Forks `worker_count` children and waits for all of them.
///
/// Returns one [`ChildExit`] per child, in the order the children were
/// reaped.
pub fn run(worker_count: usize, bound: u64) -> Result<Vec<ChildExit>> {
    // SAFETY: the child only runs the worker, writes to stdout/stderr and
    // calls `_exit`. See the module docs for the single-thread requirement.
    run_with_fork(worker_count, bound, |_| unsafe { fork() })
}

/// Like [`run`], but each child is created by `fork_worker`, which receives
/// the worker id and must behave like `fork`.
pub fn run_with_fork<S>(
    worker_count: usize,
    bound: u64,
    mut fork_worker: S,
) -> Result<Vec<ChildExit>>
where
    S: FnMut(usize) -> nix::Result<ForkResult>,
{
    // Anything still buffered would be printed again by every child.
    io::stdout().flush().context("Failed to flush stdout before forking")?;

    let mut forked = 0;
    for worker_id in 0..worker_count {
        let spec = WorkerSpec::new(worker_id, worker_count, bound);

        match fork_worker(worker_id) {
            Ok(ForkResult::Child) => run_child(spec),
            Ok(ForkResult::Parent { child }) => {
                log::debug!("forked pid {} for worker {}", child, worker_id);
                forked += 1;
            }
            Err(errno) => {
                log::error!(
                    "can not fork process for worker {}, reaping {} started children",
                    worker_id,
                    forked
                );
                // Exit records of the already-forked children are discarded.
                let _ = reap(forked);
                return Err(SpawnError::Process {
                    worker_id,
                    source: io::Error::from(errno),
                }
                .into());
            }
        }
    }

    reap(forked)
}

/// Body of a forked child. Never returns.
fn run_child(spec: WorkerSpec) -> ! {
    let code = match spec.run_and_report(UnitKind::Process, &mut io::stdout().lock()) {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(io::stderr(), "{:#}", e);
            1
        }
    };
    // SAFETY: `_exit` terminates immediately without running the atexit
    // handlers or flushing state inherited from the parent. The report line
    // was already flushed by `run_and_report`.
    unsafe { libc::_exit(code) }
}

/// Waits for any child exactly `count` times.
fn reap(count: usize) -> Result<Vec<ChildExit>> {
    let mut exits = Vec::with_capacity(count);

    while exits.len() < count {
        let status = match wait() {
            Ok(status) => status,
            Err(Errno::EINTR) => continue,
            Err(errno) => {
                return Err(io::Error::from(errno)).with_context(|| {
                    format!("wait failed after reaping {} of {} children", exits.len(), count)
                })
            }
        };

        let exit = match status {
            WaitStatus::Exited(pid, code) => ChildExit {
                pid: pid.as_raw(),
                code: Some(code),
            },
            WaitStatus::Signaled(pid, signal, _) => {
                log::warn!("child {} was killed by {:?}", pid, signal);
                ChildExit {
                    pid: pid.as_raw(),
                    code: None,
                }
            }
            // Stop/continue notifications need WUNTRACED/WCONTINUED, which are
            // never requested.
            other => {
                log::debug!("ignoring wait status {:?}", other);
                continue;
            }
        };

        if !exit.success() {
            log::warn!("child {} exited abnormally: {:?}", exit.pid, exit.code);
        } else {
            log::debug!("reaped child {}", exit.pid);
        }
        exits.push(exit);
    }

    Ok(exits)
}
