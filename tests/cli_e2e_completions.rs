//! End-to-end tests for the `completions` command.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_for_each_shell() {
    for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
        let mut cmd = cargo_bin_cmd!("yaml-folder");
        cmd.args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("yaml-folder"));
    }
}

#[test]
fn test_completions_rejects_unknown_shell() {
    let mut cmd = cargo_bin_cmd!("yaml-folder");
    cmd.args(["completions", "tcsh"]).assert().failure();
}
