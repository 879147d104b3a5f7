//! JavaScript sources

use polish_core::process::{local, CommandResult};
use polish_core::Result;
use polish_sniff::{info, Registry, Severity, SniffHandle, SniffOptions, Timing};

#[derive(Debug, Clone)]
pub struct Sniffs {
    pub run_eslint: SniffHandle,
}

impl Sniffs {
    pub fn handles(&self) -> [&SniffHandle; 1] {
        [&self.run_eslint]
    }
}

pub fn register(registry: &mut Registry) -> Sniffs {
    Sniffs {
        run_eslint: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Major)
                .timing(Timing::Fast)
                .description("Run the project's ESLint"),
            "run_eslint",
            run_eslint,
        ),
    }
}

/// Uses the ESLint installed in the project's node_modules
fn run_eslint() -> Result<CommandResult> {
    info("Running ESLint...");
    local("git ls-files | grep '\\.js$' | xargs ./node_modules/eslint/bin/eslint.js")
}
