//! Contributed sniffs
//!
//! Shell one-liners over `git ls-files`, grouped by what they look at:
//! - version control leftovers
//! - file permissions and whitespace
//! - Python, PHP and JavaScript sources
//!
//! [`register_all`] registers every sniff and hands back their handles so a
//! project can reclassify them with [`polish_sniff::update_sniff`].

pub mod files;
pub mod javascript;
pub mod php;
pub mod python;
pub mod vcs;

use polish_sniff::{Registry, SniffHandle};

/// Handles of every contributed sniff
#[derive(Debug, Clone)]
pub struct Contrib {
    pub vcs: vcs::Sniffs,
    pub files: files::Sniffs,
    pub python: python::Sniffs,
    pub php: php::Sniffs,
    pub javascript: javascript::Sniffs,
}

impl Contrib {
    /// All handles in registration order
    pub fn handles(&self) -> Vec<&SniffHandle> {
        let mut handles = Vec::new();
        handles.extend(self.vcs.handles());
        handles.extend(self.files.handles());
        handles.extend(self.python.handles());
        handles.extend(self.php.handles());
        handles.extend(self.javascript.handles());
        handles
    }
}

/// Register every contributed sniff
pub fn register_all(registry: &mut Registry) -> Contrib {
    Contrib {
        vcs: vcs::register(registry),
        files: files::register(registry),
        python: python::register(registry),
        php: php::register(registry),
        javascript: javascript::register(registry),
    }
}
