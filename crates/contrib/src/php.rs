//! PHP sources

use polish_core::process::{command_exists, local, CommandResult};
use polish_core::Result;
use polish_sniff::{info, Registry, Severity, SniffHandle, SniffOptions, Timing};

#[derive(Debug, Clone)]
pub struct Sniffs {
    pub find_php_syntax_errors: SniffHandle,
    pub check_php_debug_info: SniffHandle,
    pub composer_validate: SniffHandle,
    pub check_preg_replace: SniffHandle,
}

impl Sniffs {
    pub fn handles(&self) -> [&SniffHandle; 4] {
        [
            &self.find_php_syntax_errors,
            &self.check_php_debug_info,
            &self.composer_validate,
            &self.check_preg_replace,
        ]
    }
}

pub fn register(registry: &mut Registry) -> Sniffs {
    let major = || SniffOptions::new().severity(Severity::Major).timing(Timing::Fast);

    Sniffs {
        find_php_syntax_errors: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Major)
                .timing(Timing::Slow)
                .description("Lint every php file"),
            "find_php_syntax_errors",
            find_php_syntax_errors,
        ),
        check_php_debug_info: registry.sniff_with(
            major().description("Find var_dump, echo and die"),
            "check_php_debug_info",
            check_php_debug_info,
        ),
        composer_validate: registry.sniff_with(
            SniffOptions::new()
                .severity(Severity::Critical)
                .timing(Timing::Fast)
                .description("Validate composer.json"),
            "composer_validate",
            composer_validate,
        ),
        check_preg_replace: registry.sniff_with(
            major().description("Find preg_replace calls"),
            "check_preg_replace",
            check_preg_replace,
        ),
    }
}

fn find_php_syntax_errors() -> Result<CommandResult> {
    info("Finding syntax error in php files...");
    local(
        "git ls-files -z | grep -PZz '\\.(php|phtml)$' | \
         xargs -0 -n 1 php -d display_errors=stderr -l >/dev/null",
    )
}

/// Lines marked `NOCHECK` are allowed
fn check_php_debug_info() -> Result<CommandResult> {
    info("Checking for var_dump, echo or die statements...");
    local("! find ./src -name '*.php' -print0 | xargs -0 grep -En 'var_dump|echo|die' | grep -v 'NOCHECK'")
}

fn composer_validate() -> Result<CommandResult> {
    info("Running composer validate...");
    if !command_exists("composer") {
        return Ok(CommandResult::synthetic("composer validate", false, "composer not found in PATH"));
    }
    local("composer validate")
}

fn check_preg_replace() -> Result<CommandResult> {
    info("Checking use of preg_replace...");
    local("! find src -name '*.php' -print0 | xargs -0 grep -n 'preg_replace('")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polish_sniff::{polish, StaticTasks};
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();
        for (name, contents) in files {
            std::fs::write(temp.path().join("src").join(name), contents).unwrap();
        }
        temp
    }

    #[test]
    fn test_debug_statement_fails() {
        let temp = project(&[("index.php", "<?php\nvar_dump($user);\n")]);
        let mut registry = Registry::new(temp.path());
        let sniffs = register(&mut registry);

        let result = sniffs.check_php_debug_info.call().unwrap();
        assert!(result.failed());
        assert!(result.stdout.contains("var_dump"));
    }

    #[test]
    fn test_nocheck_debug_statement_passes() {
        let temp = project(&[("index.php", "<?php\necho $banner; // NOCHECK\n")]);
        let mut registry = Registry::new(temp.path());
        let sniffs = register(&mut registry);

        assert!(!sniffs.check_php_debug_info.call().unwrap().failed());
    }

    #[test]
    fn test_preg_replace_in_ci_run() {
        let temp = project(&[
            ("clean.php", "<?php\n$x = str_replace('a', 'b', $y);\n"),
            ("legacy.php", "<?php\n$x = preg_replace('/a/', 'b', $y);\n"),
        ]);
        let mut registry = Registry::new(temp.path());
        register(&mut registry);
        let tasks: StaticTasks = ["check_preg_replace"].into_iter().collect();

        let report = polish(&registry, &tasks, "ci").unwrap();
        assert_eq!(report.executed(), ["check_preg_replace"]);
        assert!(report.failed());
        assert!(report.outcomes[0].output.contains("legacy.php"));
    }
}
