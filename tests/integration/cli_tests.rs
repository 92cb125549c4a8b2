//! Integration tests for the CLI binary.
//!
//! Drives the `gogen` binary end to end: flag parsing, environment
//! binding, validation messages, stdin piping and output format.
//!
//! This test is registered as a [[test]] in the gogen-cli crate so that
//! CARGO_BIN_EXE_gogen is available.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Get a Command pointing to the `gogen` binary with a clean environment.
fn gogen_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gogen"));
    for var in [
        "GOGEN_SHOW",
        "GOGEN_LENGTH",
        "GOGEN_NO_REQUIRE_ALL",
        "GOGEN_ALGORITHM",
        "GOGEN_COST",
        "GOGEN_BENCHMARK",
        "GOGEN_MIN_COST",
        "GOGEN_MAX_COST",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(args: &[&str]) -> Output {
    gogen_binary()
        .args(args)
        .output()
        .expect("failed to execute gogen")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = gogen_binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn gogen");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for gogen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);
    assert!(
        output.status.success(),
        "gogen --help should exit with success, stderr: {}",
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("Usage"), "help should contain usage, got: {out}");
    for sub in ["key", "password", "hash", "verify"] {
        assert!(out.contains(sub), "help should list {sub}, got: {out}");
    }
}

#[test]
fn cli_responds_to_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0.1"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(!output.status.success());
}

// === key ===

#[test]
fn key_default_is_32_bytes_of_hex() {
    let output = run(&["key"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let key = stdout(&output);
    assert_eq!(key.len(), 64, "no trailing newline expected: {key:?}");
    assert!(key
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn key_custom_length() {
    let output = run(&["key", "-l", "64"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).len(), 128);
}

#[test]
fn key_length_from_environment() {
    let output = gogen_binary()
        .arg("key")
        .env("GOGEN_LENGTH", "48")
        .output()
        .expect("failed to execute gogen");
    assert!(output.status.success());
    assert_eq!(stdout(&output).len(), 96);
}

#[test]
fn key_rejects_length_out_of_range() {
    let output = run(&["key", "--length", "16"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("usage error"), "got: {err}");
    assert!(err.contains("Length must be 32 or greater"), "got: {err}");
}

#[test]
fn key_rejects_non_multiple_of_four() {
    let output = run(&["key", "--length", "34"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("multiple of 4 bytes"));
}

#[test]
fn key_consecutive_runs_differ() {
    assert_ne!(stdout(&run(&["key"])), stdout(&run(&["key"])));
}

// === password ===

#[test]
fn password_default_length_and_classes() {
    let output = run(&["password"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let pw = stdout(&output);
    assert_eq!(pw.len(), 16);
    assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
    assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
    assert!(pw.chars().any(|c| c.is_ascii_digit()));
    assert!(pw.chars().any(|c| !c.is_ascii_alphanumeric()));
}

#[test]
fn password_alias_and_length() {
    let output = run(&["pw", "-l", "40"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).len(), 40);
}

#[test]
fn password_too_short_for_all_classes() {
    let output = run(&["password", "-l", "3"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Length must be 4 or greater"));

    let output = run(&["password", "-l", "3", "--no-require-all"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).len(), 3);
}

// === hash ===

#[test]
fn hash_bcrypt_with_cost() {
    let output = run(&["hash", "-c", "4", "correct horse battery staple"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let record = stdout(&output);
    assert!(record.starts_with("$2b$04$"), "got: {record}");
    assert_eq!(record, record.trim());
    assert_eq!(record.len(), 60);
}

#[test]
fn hash_argon2id() {
    let output = run(&["hash", "--algorithm", "argon2id", "hunter2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let record = stdout(&output);
    assert!(
        record.starts_with("$argon2id$v=19$m=65536,t=3,p=4$"),
        "got: {record}"
    );
    assert_eq!(record.split('$').count(), 6);
}

#[test]
fn hash_argon2id_rejects_custom_cost() {
    let output = run(&["hash", "-a", "argon2id", "-c", "10", "hunter2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("argon2id does not support a custom cost"));
}

#[test]
fn hash_argon2id_rejects_benchmark() {
    let output = run(&["hash", "-a", "argon2id", "-b", "hunter2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("argon2id does not support benchmarking"));
}

#[test]
fn hash_rejects_unknown_algorithm() {
    let output = run(&["hash", "-a", "scrypt", "hunter2"]);
    assert!(!output.status.success());
}

#[test]
fn hash_rejects_cost_out_of_range() {
    let output = run(&["hash", "-c", "32", "hunter2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cost must be 31 or less"));
}

#[test]
fn hash_reads_password_from_stdin() {
    let output = run_with_stdin(&["hash", "-c", "4"], "from-stdin\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let record = stdout(&output);

    let verify = run(&["verify", &record, "from-stdin"]);
    assert!(verify.status.success(), "stderr: {}", stderr(&verify));
}

#[test]
fn hash_argument_wins_over_stdin() {
    let output = run_with_stdin(&["hash", "-c", "4", "from-arg"], "from-stdin");
    assert!(output.status.success());
    assert!(
        stderr(&output).contains("reading password from argument, ignoring stdin"),
        "got: {}",
        stderr(&output)
    );
    let record = stdout(&output);
    assert!(run(&["verify", &record, "from-arg"]).status.success());
    assert!(!run(&["verify", &record, "from-stdin"]).status.success());
}

#[test]
fn hash_requires_password() {
    let output = run_with_stdin(&["hash"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Password is a required field"));
}

#[test]
fn hash_benchmark_streams_table() {
    let output = run(&["hash", "-b", "--min-cost", "4", "--max-cost", "5", "hunter2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "got: {out}");
    assert_eq!(lines[0], "| Cost Factor  | Estimated Time    |");
    assert!(lines[2].starts_with("| 4 "));
    assert!(lines[3].starts_with("| 5 "));
}

#[test]
fn hash_benchmark_rejects_inverted_range() {
    let output = run(&["hash", "-b", "--min-cost", "6", "--max-cost", "5", "hunter2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("MinCost must not exceed MaxCost"));
}

// === verify ===

#[test]
fn verify_reports_mismatch() {
    let record = stdout(&run(&["hash", "-c", "4", "right"]));
    let output = run(&["verify", &record, "wrong"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("password does not match hash"));
}

#[test]
fn verify_argon2id_record() {
    let record = stdout(&run(&["hash", "-a", "argon2id", "right"]));
    let output = run(&["verify", &record, "right"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "valid");
}

#[test]
fn verify_rejects_malformed_record() {
    let output = run(&["verify", "not-a-hash", "pw"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("malformed hash record"));
}

// === --show ===

#[test]
fn show_prints_masked_settings() {
    let output = run(&["--show", "hash", "-c", "10", "super-secret"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let json: serde_json::Value = serde_json::from_str(&out).expect("show prints JSON");
    assert_eq!(json["command"], "hash");
    assert_eq!(json["cost"], 10);
    assert_eq!(json["algorithm"], "bcrypt");
    assert_eq!(json["password"], "********");
    assert!(!out.contains("super-secret"));
}

#[test]
fn show_reports_bcrypt_record_cost() {
    let record = stdout(&run(&["hash", "-c", "5", "right"]));
    let output = run(&["verify", "--show", &record, "right"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["command"], "verify");
    assert_eq!(json["algorithm"], "bcrypt");
    assert_eq!(json["cost"], 5);
    assert_eq!(json["password"], "********");
}

#[test]
fn verify_long_password_against_malformed_record() {
    let long = "a".repeat(80);
    let output = run(&["verify", "$2b$garbage", &long]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("malformed hash record"),
        "got: {}",
        stderr(&output)
    );
}

#[test]
fn show_skips_validation() {
    let output = run(&["key", "-l", "7", "-s"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["length"], 7);
}
