//! Integration tests for the CLI binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fleet-ticket").unwrap();
    cmd.arg("--data-dir").arg(data_dir).arg("--no-color");
    cmd
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join(".fleet-ticket");

    cmd(&data_dir).arg("init").assert().success();
    cmd(&data_dir)
        .args([
            "vendor",
            "add",
            "--name",
            "ABC Manufacturer Workshop",
            "--email",
            "vendor@example.com",
        ])
        .assert()
        .success();
    cmd(&data_dir)
        .args([
            "bus",
            "add",
            "--bus-number",
            "123",
            "--model",
            "ABC Model",
            "--manufacturer",
            "ABC Manufacturer",
            "--year",
            "2018",
        ])
        .assert()
        .success();

    (temp_dir, data_dir)
}

/// Create a ticket via --json and return its id
fn create_ticket(data_dir: &std::path::Path) -> String {
    let output = cmd(data_dir)
        .args([
            "--json",
            "--actor",
            "creator@example.com",
            "--role",
            "creator",
            "create",
            "--title",
            "Scheduled minor service",
            "--service-type",
            "minor",
            "--bus",
            "123",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {output:?}");

    let ticket: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    ticket["id"].as_str().unwrap().to_string()
}

#[test]
fn uninitialized_directory_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join(".fleet-ticket");

    cmd(&data_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn workflow_through_the_cli() {
    let (_guard, data_dir) = setup();
    let id = create_ticket(&data_dir);

    // The vendor cannot see the ticket before approval
    cmd(&data_dir)
        .args([
            "--actor",
            "vendor@example.com",
            "--role",
            "vendor",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets to display"));

    cmd(&data_dir)
        .args([
            "--actor",
            "supervisor@example.com",
            "--role",
            "supervisor",
            "approve",
            &id,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("now approved"));

    cmd(&data_dir)
        .args([
            "--actor",
            "vendor@example.com",
            "--role",
            "vendor",
            "acknowledge",
            &id,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("now acknowledged"));

    cmd(&data_dir)
        .args([
            "--actor",
            "vendor@example.com",
            "--role",
            "vendor",
            "invoice",
            &id,
            "--amount",
            "180.50",
            "--description",
            "Minor service completed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("now invoiced"));

    cmd(&data_dir)
        .args([
            "--actor",
            "supervisor@example.com",
            "--role",
            "supervisor",
            "complete",
            &id,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("now completed"));

    // Purchase sees the settled ticket with its final cost
    cmd(&data_dir)
        .args([
            "--actor",
            "purchase@example.com",
            "--role",
            "purchase",
            "show",
            &id,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final cost:  180.50"));
}

#[test]
fn wrong_role_is_denied() {
    let (_guard, data_dir) = setup();
    let id = create_ticket(&data_dir);

    cmd(&data_dir)
        .args([
            "--actor",
            "vendor@example.com",
            "--role",
            "vendor",
            "approve",
            &id,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn creation_validation_is_surfaced() {
    let (_guard, data_dir) = setup();

    cmd(&data_dir)
        .args([
            "--actor",
            "creator@example.com",
            "--role",
            "creator",
            "create",
            "--title",
            "AC is not cooling",
            "--service-type",
            "repair",
            "--bus",
            "123",
            "--vendor",
            "vendor@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repair_category"));
}

#[test]
fn duplicate_bus_is_warned_and_catalog_unchanged() {
    let (_guard, data_dir) = setup();

    cmd(&data_dir)
        .args([
            "bus",
            "add",
            "--bus-number",
            "123",
            "--model",
            "Other Model",
            "--manufacturer",
            "Other",
            "--year",
            "2022",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    cmd(&data_dir)
        .args(["bus", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC Model").and(predicate::str::contains("Other Model").not()));
}

#[test]
fn summary_shows_role_dashboard() {
    let (_guard, data_dir) = setup();
    create_ticket(&data_dir);

    cmd(&data_dir)
        .args([
            "--actor",
            "supervisor@example.com",
            "--role",
            "supervisor",
            "summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending approval: 1"));
}
