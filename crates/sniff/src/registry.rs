//! Ordered collection of registered sniffs
//!
//! Registration order is execution order. Names are not deduplicated here;
//! lookups return the first entry with a matching name.

use crate::sniff::{Sniff, SniffHandle, SniffOptions};
use polish_core::process::CommandResult;
use polish_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Every sniff known to this process
#[derive(Debug)]
pub struct Registry {
    checks_root: PathBuf,
    sniffs: Vec<Sniff>,
}

impl Registry {
    /// Create an empty registry whose sniffs run in `checks_root`
    pub fn new(checks_root: impl Into<PathBuf>) -> Self {
        Self {
            checks_root: checks_root.into(),
            sniffs: Vec::new(),
        }
    }

    pub fn checks_root(&self) -> &Path {
        &self.checks_root
    }

    /// Append an entry
    pub fn register(&mut self, sniff: Sniff) {
        tracing::debug!(
            sniff = sniff.name(),
            severity = %sniff.severity(),
            timing = %sniff.timing(),
            "registered sniff"
        );
        self.sniffs.push(sniff);
    }

    /// All entries in registration order
    pub fn all(&self) -> &[Sniff] {
        &self.sniffs
    }

    pub fn len(&self) -> usize {
        self.sniffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sniffs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sniffs.iter().map(Sniff::name)
    }

    /// First entry named `name`
    pub fn find_by_name(&self, name: &str) -> Result<&Sniff> {
        self.sniffs
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::sniff_not_found(name))
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Sniff> {
        self.sniffs
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::sniff_not_found(name))
    }

    /// Register a critical/fast sniff
    pub fn sniff<F>(&mut self, name: impl Into<String>, func: F) -> SniffHandle
    where
        F: Fn() -> Result<CommandResult> + 'static,
    {
        self.sniff_with(SniffOptions::default(), name, func)
    }

    /// Register a sniff with explicit classification
    pub fn sniff_with<F>(&mut self, options: SniffOptions, name: impl Into<String>, func: F) -> SniffHandle
    where
        F: Fn() -> Result<CommandResult> + 'static,
    {
        let handle = SniffHandle::wrap(
            name.into(),
            options.description,
            self.checks_root.clone(),
            Box::new(func),
        );
        self.register(Sniff::new(handle.clone(), options.severity, options.timing));
        handle
    }
}
