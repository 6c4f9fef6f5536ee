//! Integration tests for the `poststep` binary.
//!
//! Each test points the state file at a temp directory and scrubs the
//! runner variables, so nothing leaks in from the environment the suite
//! itself runs under (which may well be a GitHub Actions job).
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `poststep` binary with env isolation.
fn poststep_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("poststep");
    cmd.env("HOME", "/tmp/poststep-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/poststep-test-nonexistent")
        .env_remove("INPUT_KEY")
        .env_remove("INPUT_MAIN")
        .env_remove("INPUT_POST")
        .env_remove("GITHUB_STATE")
        .env_remove("POSTSTEP_CONFIG")
        .env_remove("POSTSTEP_LOG__FORMAT")
        .env_remove("POSTSTEP_LOG__LEVEL")
        .env_remove("POSTSTEP_SHELL__PROGRAM")
        .env_remove("POSTSTEP_SHELL__ARGS")
        .env_remove("STATE_CLEANUP")
        .env_remove("STATE_MY_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// A `poststep` command wired like the runner wires an action.
fn step_cmd(state: &Path, key: &str, main: &str, post: &str) -> assert_cmd::Command {
    let mut cmd = poststep_cmd();
    cmd.env("INPUT_KEY", key)
        .env("INPUT_MAIN", main)
        .env("INPUT_POST", post)
        .env("GITHUB_STATE", state);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    poststep_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("post step")
            .and(predicate::str::contains("phase"))
            .and(predicate::str::contains("INPUT_KEY")),
    );
}

#[test]
fn test_version_flag() {
    poststep_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("poststep"));
}

#[test]
fn test_completions_bash() {
    poststep_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    poststep_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_man_page_is_embedded() {
    poststep_cmd()
        .arg("man")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH").and(predicate::str::contains("poststep")));
}

// ── Main phase ──────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_main_phase_records_state_and_runs_main() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "echo post")
        .assert()
        .code(0)
        .stdout("main\n");

    assert_eq!(fs::read_to_string(&state).unwrap(), "CLEANUP=true\n");
}

#[cfg(unix)]
#[test]
fn test_main_phase_appends_to_existing_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    fs::write(&state, "OTHER=value\n").unwrap();

    step_cmd(&state, "cleanup", "true", "")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&state).unwrap(),
        "OTHER=value\nCLEANUP=true\n"
    );
}

#[cfg(unix)]
#[test]
fn test_main_exit_code_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "exit 7", "")
        .assert()
        .code(7);

    // The flag is written before `main` runs, so the post step still fires.
    assert_eq!(fs::read_to_string(&state).unwrap(), "CLEANUP=true\n");
}

#[cfg(unix)]
#[test]
fn test_no_subcommand_is_run() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo a", "")
        .arg("run")
        .assert()
        .success()
        .stdout("a\n");

    step_cmd(&state, "cleanup", "echo b", "")
        .assert()
        .success()
        .stdout("b\n");
}

#[cfg(unix)]
#[test]
fn test_empty_main_command_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "", "echo post")
        .assert()
        .success()
        .stdout("");

    assert!(state.exists());
}

// ── Post phase ──────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_post_phase_runs_post_without_writing_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "echo post")
        .env("STATE_CLEANUP", "true")
        .assert()
        .success()
        .stdout("post\n");

    assert!(!state.exists());
}

#[cfg(unix)]
#[test]
fn test_post_phase_with_empty_state_value() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "echo post")
        .env("STATE_CLEANUP", "")
        .assert()
        .success()
        .stdout("post\n");
}

#[cfg(unix)]
#[test]
fn test_post_phase_with_non_unicode_state_value() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "echo post")
        .env("STATE_CLEANUP", OsStr::from_bytes(&[0xff, 0xfe]))
        .assert()
        .success()
        .stdout("post\n");

    assert!(!state.exists());
}

#[cfg(unix)]
#[test]
fn test_post_phase_exit_code_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "true", "exit 3")
        .env("STATE_CLEANUP", "true")
        .assert()
        .code(3);
}

#[cfg(unix)]
#[test]
fn test_post_phase_does_not_need_state_file() {
    poststep_cmd()
        .env("INPUT_KEY", "cleanup")
        .env("INPUT_POST", "echo post")
        .env("STATE_CLEANUP", "true")
        .assert()
        .success()
        .stdout("post\n");
}

// ── Key handling ────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_key_is_upper_cased_in_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "My_Key", "true", "")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&state).unwrap(), "MY_KEY=true\n");
}

#[cfg(unix)]
#[test]
fn test_post_lookup_uses_upper_cased_key() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "my_key", "echo main", "echo post")
        .env("STATE_MY_KEY", "true")
        .assert()
        .success()
        .stdout("post\n");

    // A mixed-case variable is a different name and does not count.
    step_cmd(&state, "my_key", "echo main", "echo post")
        .env("STATE_my_key", "true")
        .assert()
        .success()
        .stdout("main\n");
}

#[cfg(unix)]
#[test]
fn test_flags_override_env() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let flag_state = dir.path().join("flag-state");

    step_cmd(&state, "ignored", "echo env", "")
        .args(["--key", "cleanup", "--main", "echo flag"])
        .arg("--state-file")
        .arg(&flag_state)
        .assert()
        .success()
        .stdout("flag\n");

    assert!(!state.exists());
    assert_eq!(fs::read_to_string(&flag_state).unwrap(), "CLEANUP=true\n");
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_missing_key_is_usage_error() {
    poststep_cmd()
        .env("INPUT_MAIN", "echo main")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("INPUT_KEY"));
}

#[test]
fn test_invalid_key_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "a=b", "echo main", "")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid state key"));

    assert!(!state.exists());
}

#[test]
fn test_missing_state_file_in_main_phase() {
    poststep_cmd()
        .env("INPUT_KEY", "cleanup")
        .env("INPUT_MAIN", "echo main")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("GITHUB_STATE"));
}

#[test]
fn test_unwritable_state_file_is_general_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("missing-dir").join("state");

    step_cmd(&state, "cleanup", "echo main", "")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("state file"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "")
        .args(["--config", "/tmp/poststep-test-nonexistent/config.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unknown_shell_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let config = dir.path().join("poststep.toml");
    fs::write(
        &config,
        "[shell]\nprogram = \"/tmp/poststep-test-nonexistent/sh\"\nargs = [\"-c\"]\n",
    )
    .unwrap();

    step_cmd(&state, "cleanup", "echo main", "")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to start shell"));
}

// ── Settings ────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_configured_shell_args() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let config = dir.path().join("poststep.toml");
    fs::write(&config, "[shell]\nprogram = \"sh\"\nargs = [\"-e\", \"-c\"]\n").unwrap();

    // With -e the first failing command ends the script.
    step_cmd(&state, "cleanup", "false; echo unreachable", "")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stdout("");
}

#[cfg(unix)]
#[test]
fn test_json_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    let output = step_cmd(&state, "cleanup", "echo main", "")
        .env("POSTSTEP_LOG__FORMAT", "json")
        .arg("-v")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "main\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap();
    let event: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(event["level"], "INFO");
}

// ── phase subcommand ────────────────────────────────────────────────

#[test]
fn test_phase_plain_main() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    step_cmd(&state, "cleanup", "echo main", "echo post")
        .args(["phase", "--color", "never"])
        .assert()
        .success()
        .stdout("main\n");

    assert!(!state.exists());
}

#[test]
fn test_phase_json_post() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    let output = step_cmd(&state, "cleanup", "echo main", "echo post")
        .env("STATE_CLEANUP", "true")
        .args(["phase", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["phase"], "post");
    assert_eq!(plan["key"], "CLEANUP");
    assert_eq!(plan["command"], "echo post");
    assert_eq!(plan["writes_state"], false);
}

#[test]
fn test_phase_invalid_output_format() {
    poststep_cmd()
        .args(["phase", "--output", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values").or(predicate::str::contains("invalid")));
}
