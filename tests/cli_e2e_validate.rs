//! End-to-end tests for the `validate` and `graph` commands.

mod common;
use common::prelude::*;

#[test]
fn test_validate_reports_counts() {
    let fixture = TestFixture::new().with_tree(trees::DATACENTERS);
    fixture
        .inventory_command()
        .args(["--color", "never", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Inventory resolved successfully"))
        .stdout(predicate::str::contains("Hosts: 4"))
        .stdout(predicate::str::contains("Groups: 3"))
        .stdout(predicate::str::contains("Tree-level groups: 2"));
}

#[test]
fn test_validate_fails_on_bad_vars_file() {
    let fixture = TestFixture::new()
        .with_file("inventory/main.yml", "h1:\n")
        .with_file("inventory/vars.yml", "- a\n- b\n");
    fixture
        .inventory_command()
        .args(["--color", "never", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[ERR]"))
        .stderr(predicate::str::contains("got list"));
}

#[test]
fn test_validate_strict_requires_hosts() {
    let fixture = TestFixture::new().with_file("inventory/vars.yml", "a: 1\n");
    fixture
        .inventory_command()
        .args(["--color", "never", "validate", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[WARN] No hosts were declared"));
}

#[test]
fn test_graph_hides_tree_groups_by_default() {
    let fixture = TestFixture::new().with_tree(trees::DATACENTERS);
    fixture
        .inventory_command()
        .args(["--color", "never", "graph"])
        .assert()
        .success()
        .stdout(predicate::str::contains("canary"))
        .stdout(predicate::str::contains("dc2-db1"))
        .stdout(predicate::str::contains("__yaml_folder__").not());
}

#[test]
fn test_graph_shows_tree_groups_and_vars() {
    let fixture = TestFixture::new().with_tree(trees::DATACENTERS);
    fixture
        .inventory_command()
        .args(["graph", "--show-tree-groups", "--vars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("__yaml_folder__dc1_web"))
        .stdout(predicate::str::contains("http_port = 8080"));
}
