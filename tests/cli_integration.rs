//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! `CREDVAULT_PASSWORD` stands in for the interactive password prompt,
//! so every flow runs non-interactively.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the credvault binary.
fn credvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("credvault").expect("binary should exist")
}

/// Helper: drop a config file with cheap Argon2 params into `dir` so
/// the tests do not pay the full interactive-strength hashing cost.
fn write_fast_config(dir: &TempDir) {
    std::fs::write(
        dir.path().join(".credvault.toml"),
        "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
    )
    .unwrap();
}

/// Helper: a credvault command rooted in `dir` with the operator
/// password supplied via the environment.
fn signed_in(dir: &TempDir, user: &str, password: &str) -> Command {
    let mut cmd = credvault();
    cmd.current_dir(dir.path())
        .env("CREDVAULT_PASSWORD", password)
        .args(["--user", user]);
    cmd
}

#[test]
fn help_flag_shows_usage() {
    credvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Local credential vault with hashed operator accounts",
        ))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag_shows_version() {
    credvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn no_args_shows_help() {
    // Running with no subcommand should show an error or help.
    credvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_a_password_of_default_length() {
    let output = credvault().arg("generate").output().unwrap();
    assert!(output.status.success());
    let password = String::from_utf8(output.stdout).unwrap();
    assert_eq!(password.trim_end_matches('\n').len(), 12);
}

#[test]
fn generate_respects_length_flag() {
    let output = credvault()
        .args(["generate", "--length", "20"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let password = String::from_utf8(output.stdout).unwrap();
    assert_eq!(password.trim_end_matches('\n').len(), 20);
}

#[test]
fn register_set_get_delete_flow() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    // Register the operator.
    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("registered"));

    // Store a secret (a fresh vault file is created on the fly).
    signed_in(&tmp, "alice", "secretpw1")
        .args(["set", "email", "p@ss1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));

    // Update it.
    signed_in(&tmp, "alice", "secretpw1")
        .args(["set", "email", "p@ss2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    // Read it back — stdout carries the bare value.
    signed_in(&tmp, "alice", "secretpw1")
        .args(["get", "email"])
        .assert()
        .success()
        .stdout(predicate::str::diff("p@ss2\n"));

    // List shows the account label.
    signed_in(&tmp, "alice", "secretpw1")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("email"));

    // Delete, then a lookup fails.
    signed_in(&tmp, "alice", "secretpw1")
        .args(["delete", "email", "--force"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "secretpw1")
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn duplicate_registration_fails() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "differentpw")
        .args(["register", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already taken"));
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "wrongpassword")
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn unknown_user_gets_the_same_rejection() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success();

    signed_in(&tmp, "nonexistent", "secretpw1")
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn get_on_missing_vault_reports_an_error() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "secretpw1")
        .args(["get", "email", "--vault", "never-created.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault file not found"));
}

#[test]
fn secrets_are_scoped_per_operator() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "alicepassword")
        .args(["register", "alice"])
        .assert()
        .success();
    signed_in(&tmp, "bob", "bobpassword1")
        .args(["register", "bob"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "alicepassword")
        .args(["set", "email", "alice-secret"])
        .assert()
        .success();

    // Bob shares the vault file but cannot see Alice's record.
    signed_in(&tmp, "bob", "bobpassword1")
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn set_reads_value_from_piped_stdin() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "secretpw1")
        .args(["register", "alice"])
        .assert()
        .success();

    signed_in(&tmp, "alice", "secretpw1")
        .args(["set", "api-token"])
        .write_stdin("tok-12345\n")
        .assert()
        .success();

    signed_in(&tmp, "alice", "secretpw1")
        .args(["get", "api-token"])
        .assert()
        .success()
        .stdout(predicate::str::diff("tok-12345\n"));
}

#[test]
fn short_env_password_fails_registration() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    signed_in(&tmp, "alice", "short")
        .args(["register", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn completions_bash_prints_a_script() {
    credvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}
