//! Selective execution of registered sniffs
//!
//! A polish run asks the task-discovery collaborator once for the names it
//! exposes, keeps the registered sniffs that are exposed and selected by the
//! environment, and runs them in registration order. A failing sniff never
//! stops the run; failures only show up in the report and its exit code.

use crate::classification::Environment;
use crate::registry::Registry;
use crate::sniff::Sniff;
use polish_cli::output::{format_count, format_duration, Status};
use polish_core::error::exit_codes;
use polish_core::{Error, Result};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

const MAX_OUTPUT_LINES: usize = 200;

/// Which task names the host exposes as runnable
///
/// Registered sniffs whose names are not in this set are skipped silently.
pub trait TaskDiscovery {
    fn discoverable_tasks(&self) -> Result<BTreeSet<String>>;
}

/// A fixed set of task names
#[derive(Debug, Clone, Default)]
pub struct StaticTasks(BTreeSet<String>);

impl StaticTasks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Into<String>> FromIterator<S> for StaticTasks {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl TaskDiscovery for StaticTasks {
    fn discoverable_tasks(&self) -> Result<BTreeSet<String>> {
        Ok(self.0.clone())
    }
}

/// Registered sniffs that the project explicitly exposes
///
/// Names in `exposed` that are not registered are ignored.
#[derive(Debug)]
pub struct RegistryTasks<'a> {
    registry: &'a Registry,
    exposed: &'a [String],
}

impl<'a> RegistryTasks<'a> {
    pub fn new(registry: &'a Registry, exposed: &'a [String]) -> Self {
        Self { registry, exposed }
    }
}

impl TaskDiscovery for RegistryTasks<'_> {
    fn discoverable_tasks(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .registry
            .names()
            .filter(|name| self.exposed.iter().any(|e| e.as_str() == *name))
            .map(str::to_string)
            .collect())
    }
}

/// What happened when one sniff ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffOutcome {
    pub name: String,
    pub failed: bool,
    /// `None` when the check could not be run at all
    pub exit_code: Option<i32>,
    pub output: String,
    pub duration: Duration,
}

/// Result of a polish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishReport {
    pub env: Environment,
    pub outcomes: Vec<SniffOutcome>,
    /// Exposed sniffs the environment filtered out
    pub skipped: Vec<String>,
}

impl PolishReport {
    pub fn failed(&self) -> bool {
        self.outcomes.iter().any(|o| o.failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SniffOutcome> {
        self.outcomes.iter().filter(|o| o.failed)
    }

    pub fn executed(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            exit_codes::FAILURE
        } else {
            exit_codes::SUCCESS
        }
    }

    /// Terminate the process with status 1 if any sniff failed
    ///
    /// Returns normally otherwise.
    pub fn exit_on_failure(&self) {
        if self.failed() {
            std::process::exit(exit_codes::FAILURE);
        }
    }

    pub fn print_summary(&self) {
        let failed = self.failures().count();
        let passed = self.outcomes.len() - failed;
        let total: Duration = self.outcomes.iter().map(|o| o.duration).sum();

        println!();
        if failed == 0 {
            Status::success(&format!(
                "{} passed, {} skipped in {}",
                format_count(passed, "sniff", "sniffs"),
                self.skipped.len(),
                format_duration(total)
            ));
        } else {
            Status::error(&format!(
                "{} failed ({} passed, {} skipped)",
                format_count(failed, "sniff", "sniffs"),
                passed,
                self.skipped.len()
            ));
            for outcome in self.failures() {
                eprintln!("  - {}", outcome.name);
            }
        }
    }
}

/// Sniffs that are exposed and selected by `env`, in registration order
pub fn select<'r>(registry: &'r Registry, tasks: &BTreeSet<String>, env: Environment) -> Vec<&'r Sniff> {
    registry
        .all()
        .iter()
        .filter(|sniff| tasks.contains(sniff.name()))
        .filter(|sniff| env.selects(sniff.severity(), sniff.timing()))
        .collect()
}

/// Run the sniffs selected for the named environment
///
/// Unknown environment names fail before anything runs.
pub fn polish(registry: &Registry, discovery: &dyn TaskDiscovery, env: &str) -> Result<PolishReport> {
    let env: Environment = env.parse()?;
    run(registry, discovery, env)
}

/// Typed form of [`polish`]
pub fn run(registry: &Registry, discovery: &dyn TaskDiscovery, env: Environment) -> Result<PolishReport> {
    let tasks = discovery.discoverable_tasks()?;
    let selected = select(registry, &tasks, env);

    let skipped = registry
        .all()
        .iter()
        .filter(|sniff| tasks.contains(sniff.name()))
        .filter(|sniff| !env.selects(sniff.severity(), sniff.timing()))
        .map(|sniff| sniff.name().to_string())
        .collect();

    tracing::info!(
        env = %env,
        registered = registry.len(),
        exposed = tasks.len(),
        selected = selected.len(),
        "polishing"
    );

    Ok(PolishReport {
        env,
        outcomes: execute(&selected),
        skipped,
    })
}

/// Run exposed sniffs by name, in the given order, ignoring classification
///
/// Every name is resolved before the first sniff runs.
pub fn run_tasks(registry: &Registry, discovery: &dyn TaskDiscovery, names: &[String]) -> Result<Vec<SniffOutcome>> {
    let tasks = discovery.discoverable_tasks()?;
    let sniffs = names
        .iter()
        .map(|name| {
            if tasks.contains(name) {
                registry.find_by_name(name)
            } else {
                Err(Error::sniff_not_found(name))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(execute(&sniffs))
}

fn execute(sniffs: &[&Sniff]) -> Vec<SniffOutcome> {
    sniffs
        .iter()
        .enumerate()
        .map(|(i, sniff)| {
            Status::step(i + 1, sniffs.len(), sniff.name());
            let outcome = execute_one(sniff);
            if !outcome.output.trim().is_empty() {
                Status::output(&outcome.output, MAX_OUTPUT_LINES);
            }
            if outcome.failed {
                Status::warning(&format!("{} failed", outcome.name));
            }
            outcome
        })
        .collect()
}

fn execute_one(sniff: &Sniff) -> SniffOutcome {
    let start = Instant::now();
    match sniff.handle().call() {
        Ok(result) => {
            if result.failed() {
                tracing::warn!(sniff = sniff.name(), exit_code = result.exit_code, "sniff failed");
            }
            SniffOutcome {
                name: sniff.name().to_string(),
                failed: result.failed(),
                exit_code: Some(result.exit_code),
                output: result.combined_output(),
                duration: start.elapsed(),
            }
        }
        Err(e) => {
            tracing::warn!(sniff = sniff.name(), error = %e, "sniff could not run");
            SniffOutcome {
                name: sniff.name().to_string(),
                failed: true,
                exit_code: None,
                output: e.to_string(),
                duration: start.elapsed(),
            }
        }
    }
}
