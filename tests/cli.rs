//! CLI integration tests for blank-prune
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;

fn blank_prune() -> Command {
    let mut cmd = Command::cargo_bin("blank-prune").unwrap();
    // keep user and project overrides out of the picture
    cmd.env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .current_dir(env!("CARGO_TARGET_TMPDIR"));
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    blank_prune()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prune blank bytes"));
}

#[test]
fn test_version() {
    blank_prune()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("blank-prune"));
}

#[test]
fn test_missing_subcommand() {
    blank_prune().assert().failure();
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn test_run_digits() {
    blank_prune()
        .args(["run", " 1  2  3    45  ", "--tier", "portable"])
        .assert()
        .success()
        .stdout("12345\n");
}

#[test]
fn test_run_pads_short_input() {
    blank_prune()
        .args(["run", "a b c"])
        .assert()
        .success()
        .stdout("abc\n");
}

#[test]
fn test_run_every_variant() {
    for (variant, expected) in [
        ("scalar", "12346789\n"),
        ("naive-single", "12346789\n"),
        ("naive-double", "12346789\n"),
        ("semi", "12346678999\n"),
        ("full", "12346789\n"),
    ] {
        blank_prune()
            .args(["run", "1234 678  9     ", "-V", variant])
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn test_run_full_all_lanes() {
    blank_prune()
        .args(["run", " bcde fghi jklm ", "-V", "full", "--all"])
        .assert()
        .success()
        .stdout("bcdefghijklm    \n");
}

#[test]
fn test_run_sample() {
    blank_prune()
        .args(["run", "--sample", "split", "-V", "naive-double"])
        .assert()
        .success()
        .stdout("12345abcdefgh\n");
}

#[test]
fn test_run_unknown_sample() {
    blank_prune()
        .args(["run", "--sample", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sample 'nope'"));
}

#[test]
fn test_run_stdin() {
    blank_prune()
        .arg("run")
        .write_stdin("x y z\n")
        .assert()
        .success()
        .stdout("xyz\n");
}

#[test]
fn test_run_rejects_long_input() {
    blank_prune()
        .args(["run", "this input is longer than sixteen bytes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("takes at most 16"));
}

#[test]
fn test_run_wide_batch() {
    blank_prune()
        .args(["run", "-w", "32", "a wider batch holds 32 bytes"])
        .assert()
        .success()
        .stdout("awiderbatchholds32bytes\n");
}

#[test]
fn test_run_invalid_width() {
    blank_prune()
        .args(["run", "-w", "24", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown width '24'"));
}

#[test]
fn test_run_hardware_tier_rejects_wide_batch() {
    // fails either as unavailable or as unsupported, never silently
    for tier in ["ssse3", "neon"] {
        blank_prune()
            .args(["run", "-w", "32", "-t", tier, "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(tier));
    }
}

#[test]
fn test_run_json() {
    let output = blank_prune()
        .args(["run", " 1  2  3    45  ", "--json", "-t", "portable"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["variant"], "naive-single");
    assert_eq!(report["tier"], "portable");
    assert_eq!(report["width"], 16);
    assert_eq!(report["length"], 5);
    assert_eq!(report["blanks"], 11);
    assert_eq!(report["output"], "12345");
    assert_eq!(report["lanes"].as_array().unwrap().len(), 16);
}

#[test]
fn test_run_random_is_seeded() {
    let first = blank_prune()
        .args(["run", "--random", "--seed", "42", "--json"])
        .output()
        .unwrap();
    let second = blank_prune()
        .args(["run", "--random", "--seed", "42", "--json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_run_sources_conflict() {
    blank_prune()
        .args(["run", "abc", "--sample", "digits"])
        .assert()
        .failure();
}

// ============================================================================
// Caps / Network / Config
// ============================================================================

#[test]
fn test_caps() {
    blank_prune()
        .arg("caps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Platform:"))
        .stdout(predicate::str::contains("naive-double"));
}

#[test]
fn test_caps_json() {
    let output = blank_prune().args(["caps", "--json"]).output().unwrap();
    let caps: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(caps["matrix"].as_array().unwrap().len(), 30);
}

#[test]
fn test_network_default() {
    blank_prune()
        .arg("network")
        .assert()
        .success()
        .stdout(predicate::str::contains("16 lanes: 10 stages, 80 comparators"))
        .stdout(predicate::str::contains("65536 inputs (exhaustive)"));
}

#[test]
fn test_network_generated_width() {
    blank_prune()
        .args(["network", "-w", "8", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(generated), 8 lanes: 6 stages, 24 comparators"));
}

#[test]
fn test_network_bad_width() {
    blank_prune()
        .args(["network", "-w", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("power of two"));
}

#[test]
fn test_config() {
    blank_prune()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("variant:   naive-single"))
        .stdout(predicate::str::contains("tier:      auto"));
}

#[test]
fn test_config_samples() {
    blank_prune()
        .args(["config", "--samples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digits"))
        .stdout(predicate::str::contains("quarters"));
}
