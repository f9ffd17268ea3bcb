//! Integration tests for shell completion generation.
//!
//! Responsibilities:
//! - Verify completion scripts are produced for the supported shells.
//! - Ensure completions work without an API key or network.

mod common;

use common::oathnet_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_bash_outputs_script() {
    oathnet_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oathnet"));
}

#[test]
fn test_completions_zsh_outputs_non_empty() {
    oathnet_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_fish_outputs_non_empty() {
    oathnet_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_reject_unknown_shell() {
    oathnet_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
