//! Scoped execution context for running checks
//!
//! A check runs with the working directory switched to the checks root and
//! with the "running: <command>" echo hidden. Both are restored when the
//! [`ExecutionScope`] is dropped, whether the check returned, failed or
//! panicked.
//!
//! The working directory is process-wide state. The outermost scope on a
//! thread holds a process-wide lock so two threads never interleave their
//! directory changes; nested scopes on the same thread do not re-lock.

use crate::error::{Error, Result};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static WORKDIR_LOCK: Mutex<()> = Mutex::new(());

/// Forces the command echo on even inside hidden scopes (`--verbose`)
static ALWAYS_ECHO: AtomicBool = AtomicBool::new(false);

thread_local! {
    static WORKDIR_DEPTH: Cell<usize> = const { Cell::new(0) };
    static HIDE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Working directory change that is undone on drop
#[derive(Debug)]
pub struct WorkdirGuard {
    previous: PathBuf,
    _lock: Option<MutexGuard<'static, ()>>,
}

impl WorkdirGuard {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> Result<Self> {
        let lock = if WORKDIR_DEPTH.with(Cell::get) == 0 {
            Some(WORKDIR_LOCK.lock().unwrap_or_else(PoisonError::into_inner))
        } else {
            None
        };

        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)
            .map_err(|e| Error::directory_not_found(dir).with_source(e))?;
        WORKDIR_DEPTH.with(|d| d.set(d.get() + 1));

        tracing::trace!(from = %previous.display(), to = %dir.display(), "entered workdir");

        Ok(Self {
            previous,
            _lock: lock,
        })
    }

    /// Directory that will be restored on drop
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!(dir = %self.previous.display(), error = %e, "failed to restore working directory");
        }
        WORKDIR_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Hides the command echo of [`crate::process::local`] until dropped
#[derive(Debug)]
pub struct HideRunning(());

impl HideRunning {
    /// Start hiding; nested scopes stack
    pub fn enter() -> Self {
        HIDE_DEPTH.with(|d| d.set(d.get() + 1));
        Self(())
    }
}

impl Drop for HideRunning {
    fn drop(&mut self) {
        HIDE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Whether commands run on this thread should be echoed
pub fn echo_running() -> bool {
    ALWAYS_ECHO.load(Ordering::Relaxed) || HIDE_DEPTH.with(Cell::get) == 0
}

/// Echo every command, even inside hidden scopes
pub fn set_always_echo(enabled: bool) {
    ALWAYS_ECHO.store(enabled, Ordering::Relaxed);
}

/// Working directory plus output mode for one check invocation
#[derive(Debug)]
pub struct ExecutionScope {
    // Declaration order is drop order: unhide before leaving the directory.
    _hidden: HideRunning,
    workdir: WorkdirGuard,
}

impl ExecutionScope {
    /// Enter `root` with the running echo hidden
    pub fn enter(root: &Path) -> Result<Self> {
        let workdir = WorkdirGuard::enter(root)?;
        Ok(Self {
            _hidden: HideRunning::enter(),
            workdir,
        })
    }

    /// Directory that will be restored on drop
    pub fn previous_dir(&self) -> &Path {
        self.workdir.previous()
    }
}
