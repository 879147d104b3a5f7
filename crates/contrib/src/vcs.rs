//! Version control leftovers: conflict markers, migration branches, edited images

use polish_core::process::{local, CommandResult};
use polish_core::Result;
use polish_sniff::{info, Registry, Severity, SniffHandle, SniffOptions, Timing};

#[derive(Debug, Clone)]
pub struct Sniffs {
    pub find_merge_conflict_leftovers: SniffHandle,
    pub check_migration_branch: SniffHandle,
    pub check_image_edited: SniffHandle,
}

impl Sniffs {
    pub fn handles(&self) -> [&SniffHandle; 3] {
        [
            &self.find_merge_conflict_leftovers,
            &self.check_migration_branch,
            &self.check_image_edited,
        ]
    }
}

pub fn register(registry: &mut Registry) -> Sniffs {
    let critical = SniffOptions::new().severity(Severity::Critical).timing(Timing::Fast);
    let major = SniffOptions::new().severity(Severity::Major).timing(Timing::Fast);

    Sniffs {
        find_merge_conflict_leftovers: registry.sniff_with(
            critical.clone().description("Find merge conflict leftovers"),
            "find_merge_conflict_leftovers",
            find_merge_conflict_leftovers,
        ),
        check_migration_branch: registry.sniff_with(
            critical.description("Check for alembic migration branch points"),
            "check_migration_branch",
            check_migration_branch,
        ),
        check_image_edited: registry.sniff_with(
            major.description("Check that images are replaced, not edited"),
            "check_image_edited",
            check_image_edited,
        ),
    }
}

fn find_merge_conflict_leftovers() -> Result<CommandResult> {
    info("Finding merge conflict leftovers...");
    local("! git grep -P '^(<|=|>){7}(?![<=>])'")
}

fn check_migration_branch() -> Result<CommandResult> {
    info("Checking migration branches...");
    local("! alembic branches | grep branchpoint")
}

/// Browsers cache images by URL, so a changed image needs a new file name
fn check_image_edited() -> Result<CommandResult> {
    info("Checking if image files have been edited...");
    info("Explanation: A new image should be created when editing images to avoid browser caching");

    let branch = local("git rev-parse --abbrev-ref HEAD")?;
    if branch.failed() {
        return Ok(branch);
    }
    local(&format!(
        "! git diff master...{} --name-only --diff-filter=M | grep \".gif\\|.png\\|.jpg\"",
        branch.stdout.trim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::git_repo;

    #[test]
    fn test_conflict_markers_fail() {
        let repo = git_repo(&[(
            "app.py",
            "def greet():\n<<<<<<< HEAD\n    return 'hi'\n=======\n    return 'hello'\n>>>>>>> feature\n",
        )]);
        let mut registry = Registry::new(repo.path());
        let sniffs = register(&mut registry);

        let result = sniffs.find_merge_conflict_leftovers.call().unwrap();
        assert!(result.failed());
        assert!(result.stdout.contains("app.py"));
    }

    #[test]
    fn test_clean_tree_passes() {
        let repo = git_repo(&[
            ("app.py", "def greet():\n    return 'hi'\n"),
            ("README.md", "Heading\n=========\n\nshell prompt: <<<< not a marker\n"),
        ]);
        let mut registry = Registry::new(repo.path());
        let sniffs = register(&mut registry);

        assert!(!sniffs.find_merge_conflict_leftovers.call().unwrap().failed());
    }
}
