//! File permissions and whitespace fix-ups
//!
//! These sniffs rewrite files in place; they fail only when the pipeline
//! itself fails.

use polish_core::process::{local, CommandResult};
use polish_core::Result;
use polish_sniff::{info, Registry, Severity, SniffHandle, SniffOptions, Timing};

/// Binary formats the whitespace fixers must not touch
const BINARY_EXTENSIONS: &str = r"\.(ico|jpg|png|gif|eot|ttf|woff|wav|xlxs)$";

#[derive(Debug, Clone)]
pub struct Sniffs {
    pub fix_file_permission: SniffHandle,
    pub fix_script_permission: SniffHandle,
    pub fix_white_space: SniffHandle,
    pub convert_tab_spaces: SniffHandle,
}

impl Sniffs {
    pub fn handles(&self) -> [&SniffHandle; 4] {
        [
            &self.fix_file_permission,
            &self.fix_script_permission,
            &self.fix_white_space,
            &self.convert_tab_spaces,
        ]
    }
}

pub fn register(registry: &mut Registry) -> Sniffs {
    let major = || SniffOptions::new().severity(Severity::Major).timing(Timing::Fast);

    Sniffs {
        fix_file_permission: registry.sniff_with(
            major().description("Set 0664 on tracked files other than scripts"),
            "fix_file_permission",
            fix_file_permission,
        ),
        fix_script_permission: registry.sniff_with(
            major().description("Set 0775 on tracked shell scripts"),
            "fix_script_permission",
            fix_script_permission,
        ),
        fix_white_space: registry.sniff_with(
            major().description("Strip trailing whitespace"),
            "fix_white_space",
            fix_white_space,
        ),
        convert_tab_spaces: registry.sniff_with(
            major().description("Convert tabs to four spaces"),
            "convert_tab_spaces",
            convert_tab_spaces,
        ),
    }
}

fn fix_file_permission() -> Result<CommandResult> {
    info("Fixing permissions for files");
    local("git ls-files -z | grep -PvZz '\\.sh$' | xargs -0 chmod -c 0664 > /dev/null 2>&1")
}

fn fix_script_permission() -> Result<CommandResult> {
    info("Fixing script permissions...");
    local("git ls-files -z | grep -PZz '\\.sh$' | xargs -0 -r chmod 0775 >/dev/null 2>&1")
}

fn fix_white_space() -> Result<CommandResult> {
    info("Fixing whitespace errors...");
    local(&whitespace_pipeline("s/\\s\\+$//"))
}

fn convert_tab_spaces() -> Result<CommandResult> {
    info("Converting tab to spaces...");
    local(&whitespace_pipeline("s/\\t/    /g"))
}

/// Files with trailing whitespace or tabs, listed on stderr, then edited by `sed`
fn whitespace_pipeline(sed_expression: &str) -> String {
    format!(
        "git ls-files -z | grep -PZvz '{}' | xargs -0 grep -PlZn '(\\s+$)|(\\t)' | tee /dev/stderr | xargs -0 -r sed -i -e '{}' ",
        BINARY_EXTENSIONS, sed_expression
    )
}
