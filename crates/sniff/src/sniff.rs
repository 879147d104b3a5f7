//! Sniff handles and registration options

use crate::classification::{Severity, Timing};
use polish_core::process::CommandResult;
use polish_core::scope::ExecutionScope;
use polish_core::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// The check itself: runs something external and reports what happened
pub type SniffFn = dyn Fn() -> Result<CommandResult>;

/// Classification supplied when registering a sniff
///
/// `SniffOptions::default()` is critical/fast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SniffOptions {
    pub severity: Severity,
    pub timing: Timing,
    /// One-line summary shown by `polish list`
    pub description: Option<String>,
}

impl SniffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate string values, typically from a config file
    ///
    /// Nothing is registered when this fails.
    pub fn parse(severity: &str, timing: &str) -> Result<Self> {
        Ok(Self {
            severity: severity.parse()?,
            timing: timing.parse()?,
            description: None,
        })
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

struct Wrapped {
    name: String,
    description: Option<String>,
    root: PathBuf,
    func: Box<SniffFn>,
}

/// Callable returned by registration
///
/// Calling it enters the checks root with the command echo hidden, runs the
/// wrapped check and restores both afterwards. Handles are cheap to clone and
/// can be called directly, outside of a polish run.
#[derive(Clone)]
pub struct SniffHandle {
    inner: Rc<Wrapped>,
}

impl SniffHandle {
    pub(crate) fn wrap(
        name: String,
        description: Option<String>,
        root: PathBuf,
        func: Box<SniffFn>,
    ) -> Self {
        Self {
            inner: Rc::new(Wrapped {
                name,
                description,
                root,
                func,
            }),
        }
    }

    /// Declared task name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Directory the check runs in
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Run the check inside its execution scope
    pub fn call(&self) -> Result<CommandResult> {
        let _scope = ExecutionScope::enter(&self.inner.root)?;
        (self.inner.func)()
    }
}

impl fmt::Debug for SniffHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SniffHandle")
            .field("name", &self.inner.name)
            .field("root", &self.inner.root)
            .finish_non_exhaustive()
    }
}

/// A registry entry: the handle plus its mutable classification
#[derive(Debug, Clone)]
pub struct Sniff {
    pub(crate) handle: SniffHandle,
    pub(crate) severity: Severity,
    pub(crate) timing: Timing,
}

impl Sniff {
    pub fn new(handle: SniffHandle, severity: Severity, timing: Timing) -> Self {
        Self {
            handle,
            severity,
            timing,
        }
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn handle(&self) -> &SniffHandle {
        &self.handle
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }
}
