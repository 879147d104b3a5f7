//! Configuration schema definitions
//!
//! Severity, timing and environment values are kept as plain strings here;
//! they are validated by the sniff registry with the same rules as values
//! passed through the API. Unknown keys are rejected so a misplaced `tasks`
//! list cannot be silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// The `[general]` table
    #[serde(default)]
    pub general: GeneralConfig,

    /// Sniffs exposed as runnable tasks; `None` exposes only the `[[sniff]]` entries
    #[serde(default)]
    pub tasks: Option<Vec<String>>,

    /// Severity/timing reclassification keyed by sniff name
    #[serde(default)]
    pub overrides: BTreeMap<String, SniffOverride>,

    /// Extra shell sniffs defined in the project
    #[serde(default, rename = "sniff")]
    pub sniffs: Vec<ShellSniffConfig>,
}

impl ConfigSchema {
    /// Task names the project exposes
    ///
    /// Exposure is opt-in: without a `tasks` list only the project's own
    /// `[[sniff]]` entries are runnable, never the contributed ones.
    pub fn exposed_tasks(&self) -> Vec<String> {
        match &self.tasks {
            Some(tasks) => tasks.clone(),
            None => self.sniffs.iter().map(|sniff| sniff.name.clone()).collect(),
        }
    }
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Directory sniffs run in, relative to the config file
    #[serde(default)]
    pub checks_root: Option<String>,

    /// Environment used when none is given on the command line
    #[serde(default = "default_env")]
    pub default_env: String,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            checks_root: None,
            default_env: default_env(),
            log_level: default_log_level(),
        }
    }
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Override for a registered sniff
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SniffOverride {
    /// New severity, left unchanged when absent
    #[serde(default)]
    pub severity: Option<String>,

    /// New timing, left unchanged when absent
    #[serde(default)]
    pub timing: Option<String>,
}

/// A sniff backed by a single shell command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShellSniffConfig {
    /// Task name the sniff is registered and exposed under
    pub name: String,

    /// Message printed before the command runs
    #[serde(default)]
    pub description: Option<String>,

    /// Shell command line; a non-zero exit status fails the sniff
    pub command: String,

    /// One of critical, major, minor, info
    #[serde(default = "default_severity")]
    pub severity: String,

    /// One of slow, fast
    #[serde(default = "default_timing")]
    pub timing: String,
}

fn default_severity() -> String {
    "critical".to_string()
}

fn default_timing() -> String {
    "fast".to_string()
}
