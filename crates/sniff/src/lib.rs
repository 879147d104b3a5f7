//! Sniff registration and selective execution
//!
//! A *sniff* is a named check (lint, whitespace fix, debug-statement search)
//! tagged with a [`Severity`] and a [`Timing`]. Sniffs are registered into a
//! [`Registry`]; [`polish`] runs the subset selected by an [`Environment`]:
//!
//! - `ci` runs every exposed sniff
//! - `dev` runs exposed sniffs that are fast and critical or major
//!
//! ```rust,no_run
//! use polish_core::process::local;
//! use polish_sniff::{info, polish, update_sniff, Registry, RegistryTasks, Severity, SniffOptions, Timing};
//!
//! let mut registry = Registry::new("/srv/project");
//! registry.sniff("find_merge_conflict_leftovers", || {
//!     info("Finding merge conflict leftovers...");
//!     local("! git grep -P '^(<|=|>){7}(?![<=>])'")
//! });
//! let pep8 = registry.sniff_with(
//!     SniffOptions::new().severity(Severity::Minor).timing(Timing::Slow),
//!     "find_pep8_violations",
//!     || local("git ls-files -z | grep -PZz '\\.py$' | xargs -0 pep8"),
//! );
//! update_sniff(&mut registry, &pep8, Some("major"), Some("fast")).unwrap();
//!
//! let exposed = vec!["find_merge_conflict_leftovers".to_string(), "find_pep8_violations".to_string()];
//! let report = polish(&registry, &RegistryTasks::new(&registry, &exposed), "dev").unwrap();
//! report.exit_on_failure();
//! ```

pub mod classification;
mod project;
pub mod registry;
pub mod runner;
pub mod sniff;
pub mod update;

pub use classification::{Environment, Severity, Timing};
pub use registry::Registry;
pub use runner::{polish, run, run_tasks, PolishReport, RegistryTasks, SniffOutcome, StaticTasks, TaskDiscovery};
pub use sniff::{Sniff, SniffHandle, SniffOptions};
pub use update::{update_sniff, SniffRef};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print an operator message, in green
pub fn info(text: &str) {
    polish_cli::output::Status::info(text);
}
