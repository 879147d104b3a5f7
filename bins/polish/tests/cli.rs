use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
tasks = ["always_ok", "slow_failure", "minor_failure"]

[[sniff]]
name = "always_ok"
description = "Nothing to see here"
command = "echo all good"

[[sniff]]
name = "slow_failure"
command = "echo broken >&2; exit 2"
severity = "major"
timing = "slow"

[[sniff]]
name = "minor_failure"
command = "false"
severity = "minor"

[[sniff]]
name = "hidden_failure"
command = "false"
"#;

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(".polish.toml"), config).unwrap();
    temp
}

fn polish(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("polish").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn dev_skips_slow_and_minor_failures() {
    let temp = project(CONFIG);
    polish(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to see here"))
        .stdout(predicate::str::contains("always_ok"))
        .stdout(predicate::str::contains("slow_failure").not());
}

#[test]
fn ci_runs_everything_exposed_and_fails() {
    let temp = project(CONFIG);
    polish(&temp)
        .arg("ci")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken"))
        .stderr(predicate::str::contains("slow_failure"))
        .stderr(predicate::str::contains("hidden_failure").not());
}

#[test]
fn polish_subcommand_accepts_env() {
    let temp = project(CONFIG);
    polish(&temp).args(["polish", "ci"]).assert().code(1);
}

#[test]
fn unknown_env_is_a_configuration_error() {
    let temp = project(CONFIG);
    polish(&temp)
        .arg("prod")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("env must be one of"))
        .stdout(predicate::str::contains("always_ok").not());
}

#[test]
fn overrides_promote_a_sniff_into_dev() {
    let config = format!("{}\n[overrides.minor_failure]\nseverity = \"major\"\n", CONFIG);
    let temp = project(&config);
    polish(&temp).arg("dev").assert().code(1);
}

#[test]
fn invalid_severity_in_config() {
    let temp = project("[[sniff]]\nname = \"x\"\ncommand = \"true\"\nseverity = \"blocker\"\n");
    polish(&temp)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("severity must be one of"));
}

#[test]
fn override_of_unknown_sniff() {
    let temp = project("[overrides.not_loaded]\ntiming = \"slow\"\n");
    polish(&temp)
        .arg("ci")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a sniff or is not loaded"));
}

#[test]
fn run_by_name_ignores_classification() {
    let temp = project(CONFIG);
    polish(&temp).args(["run", "always_ok"]).assert().success();
    polish(&temp).args(["run", "minor_failure"]).assert().code(1);
}

#[test]
fn run_unexposed_sniff_is_not_found() {
    let temp = project(CONFIG);
    polish(&temp)
        .args(["run", "hidden_failure"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a sniff"));
}

#[test]
fn list_shows_exposed_sniffs_only() {
    let temp = project(CONFIG);
    polish(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("always_ok"))
        .stdout(predicate::str::contains("minor_failure"))
        .stdout(predicate::str::contains("hidden_failure").not())
        .stdout(predicate::str::contains("run_eslint").not());
}

#[test]
fn contrib_sniffs_are_not_exposed_by_default() {
    let temp = project("");
    polish(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("find_merge_conflict_leftovers").not())
        .stdout(predicate::str::contains("fix_white_space").not());
}

#[test]
fn project_sniffs_are_exposed_without_tasks_list() {
    let temp = project("[[sniff]]\nname = \"always_ok\"\ncommand = \"true\"\n");
    polish(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("always_ok"))
        .stdout(predicate::str::contains("fix_file_permission").not());
}

#[test]
fn contrib_sniffs_are_exposed_when_listed() {
    let temp = project("tasks = [\"find_merge_conflict_leftovers\", \"find_pep8_violations\"]\n");
    polish(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("find_merge_conflict_leftovers"))
        .stdout(predicate::str::contains("find_pep8_violations"))
        .stdout(predicate::str::contains("fix_white_space").not());
}

#[test]
fn unconfigured_run_leaves_files_alone() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let script = temp.path().join("main.rs");
    let notes = temp.path().join("notes.txt");
    std::fs::write(&script, "fn main() {}\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::write(&notes, "x\t\n").unwrap();
    for args in [&["init", "-q"][..], &["add", "."][..]] {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(temp.path())
            .status()
            .unwrap();
        assert!(status.success());
    }

    polish(&temp).arg("ci").assert().success();

    let mode = std::fs::metadata(&script).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert_eq!(std::fs::read_to_string(&notes).unwrap(), "x\t\n");
}

#[test]
fn misplaced_tasks_list_is_a_configuration_error() {
    let temp = project("[general]\ndefault_env = \"dev\"\ntasks = [\"fix_white_space\"]\n");
    polish(&temp)
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tasks"));
}

#[test]
fn missing_root_directory() {
    let temp = project(CONFIG);
    polish(&temp)
        .args(["--root", "does/not/exist", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}
