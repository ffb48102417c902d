//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! store-free commands run here; engine behavior is covered by the core
//! crate's unit tests.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "droplet-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn help_lists_commands() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for command in ["run", "profile", "log", "status", "history", "tick"] {
        assert!(stdout.contains(command), "help is missing '{command}'");
    }
}

#[test]
fn profile_help_lists_settings() {
    let (stdout, _, code) = run_cli(&["profile", "set", "--help"]);
    assert_eq!(code, 0);
    for option in ["--increment", "--cadence", "--timezone", "--goal"] {
        assert!(stdout.contains(option), "profile set help is missing '{option}'");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let (_, _, code) = run_cli(&["hydrate-harder"]);
    assert_ne!(code, 0);
}

#[test]
fn log_requires_amount() {
    let (_, stderr, code) = run_cli(&["log", "--user", "u1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--amount"));
}
