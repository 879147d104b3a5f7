//! Reclassifying registered sniffs
//!
//! Used by project configuration to promote or demote a contributed sniff
//! without touching its definition.

use crate::classification::{Severity, Timing};
use crate::registry::Registry;
use crate::sniff::SniffHandle;
use polish_core::Result;

/// Identifies a sniff by handle or by name
#[derive(Debug, Clone, Copy)]
pub enum SniffRef<'a> {
    Name(&'a str),
    Handle(&'a SniffHandle),
}

impl SniffRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            SniffRef::Name(name) => name,
            SniffRef::Handle(handle) => handle.name(),
        }
    }
}

impl<'a> From<&'a str> for SniffRef<'a> {
    fn from(name: &'a str) -> Self {
        SniffRef::Name(name)
    }
}

impl<'a> From<&'a String> for SniffRef<'a> {
    fn from(name: &'a String) -> Self {
        SniffRef::Name(name)
    }
}

impl<'a> From<&'a SniffHandle> for SniffRef<'a> {
    fn from(handle: &'a SniffHandle) -> Self {
        SniffRef::Handle(handle)
    }
}

/// Overwrite the severity and/or timing of a registered sniff
///
/// Both values are validated before either is stored, so a failed update
/// changes nothing. With neither value given this only checks that the sniff
/// exists.
pub fn update_sniff<'a>(
    registry: &mut Registry,
    target: impl Into<SniffRef<'a>>,
    severity: Option<&str>,
    timing: Option<&str>,
) -> Result<()> {
    let target = target.into();
    registry.find_by_name(target.name())?;

    let severity = severity.map(str::parse::<Severity>).transpose()?;
    let timing = timing.map(str::parse::<Timing>).transpose()?;
    registry.reclassify(target.name(), severity, timing)
}

impl Registry {
    /// Typed form of [`update_sniff`]
    pub fn reclassify(&mut self, name: &str, severity: Option<Severity>, timing: Option<Timing>) -> Result<()> {
        let sniff = self.find_by_name_mut(name)?;
        if let Some(severity) = severity {
            sniff.severity = severity;
        }
        if let Some(timing) = timing {
            sniff.timing = timing;
        }
        tracing::debug!(
            sniff = name,
            severity = %sniff.severity,
            timing = %sniff.timing,
            "reclassified sniff"
        );
        Ok(())
    }
}
