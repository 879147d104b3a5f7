//! Python sources

use polish_core::process::{local, CommandResult};
use polish_core::Result;
use polish_sniff::{info, Registry, Severity, SniffHandle, SniffOptions, Timing};

#[derive(Debug, Clone)]
pub struct Sniffs {
    pub python_code_analyzer: SniffHandle,
    pub find_pep8_violations: SniffHandle,
    pub check_python_debug_info: SniffHandle,
}

impl Sniffs {
    pub fn handles(&self) -> [&SniffHandle; 3] {
        [
            &self.python_code_analyzer,
            &self.find_pep8_violations,
            &self.check_python_debug_info,
        ]
    }
}

pub fn register(registry: &mut Registry) -> Sniffs {
    Sniffs {
        python_code_analyzer: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Major)
                .timing(Timing::Fast)
                .description("Run pyflakes"),
            "python_code_analyzer",
            python_code_analyzer,
        ),
        find_pep8_violations: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Minor)
                .timing(Timing::Slow)
                .description("Run the pep8 coding standard check"),
            "find_pep8_violations",
            find_pep8_violations,
        ),
        check_python_debug_info: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Major)
                .timing(Timing::Fast)
                .description("Find debugging print statements"),
            "check_python_debug_info",
            check_python_debug_info,
        ),
    }
}

fn python_code_analyzer() -> Result<CommandResult> {
    info("Running static code analyzer");
    local("git ls-files -z | grep -PZz '\\.py$' | xargs -0 pyflakes")
}

fn find_pep8_violations() -> Result<CommandResult> {
    info("Running coding standards check for python files...");
    local("git ls-files -z | grep -PZz '\\.py$' | xargs -0 pep8")
}

/// Lines marked `NOCHECK` are allowed to print
fn check_python_debug_info() -> Result<CommandResult> {
    info("Checking for debug print statements");
    local(
        "! git ls-files -z | grep -PZz '\\.py$' | \
         xargs -0 grep -Pn '(?<![Bb]lue|>>> )print' | grep -v NOCHECK",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::git_repo;

    fn debug_info(files: &[(&str, &str)]) -> CommandResult {
        let repo = git_repo(files);
        let mut registry = Registry::new(repo.path());
        register(&mut registry).check_python_debug_info.call().unwrap()
    }

    #[test]
    fn test_debug_print_fails() {
        let result = debug_info(&[("app/views.py", "def index():\n    print(request)\n")]);
        assert!(result.failed());
        assert!(result.stdout.contains("print(request)"));
    }

    #[test]
    fn test_nocheck_print_passes() {
        let result = debug_info(&[("cli.py", "print(usage)  # NOCHECK\n")]);
        assert!(!result.failed());
    }

    #[test]
    fn test_non_python_files_are_ignored() {
        let result = debug_info(&[
            ("notes.txt", "print(everything)\n"),
            ("lib.py", "def add(a, b):\n    return a + b\n"),
        ]);
        assert!(!result.failed());
    }
}
