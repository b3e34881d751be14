//! End-to-end tests for the `safesus` binary.
//!
//! Only offline commands run here; network commands are covered by the
//! api-client integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn safesus() -> Command {
    let mut cmd = Command::cargo_bin("safesus").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn distance_prints_formatted_kilometers() {
    safesus()
        .args(["distance", "13.7563", "100.5018", "13.7465", "100.5348"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.7km"));
}

#[test]
fn distance_below_a_kilometer_prints_meters() {
    safesus()
        .args(["distance", "13.7563", "100.5018", "13.7563", "100.5060"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{3}m\n$").unwrap());
}

#[test]
fn distance_accepts_negative_coordinates() {
    safesus()
        .args(["distance", "-33.8688", "151.2093", "-33.8688", "151.2093"])
        .assert()
        .success()
        .stdout("0m\n");
}

#[test]
fn distance_json_output() {
    safesus()
        .args(["--format", "json", "distance", "13.7563", "100.5018", "13.7465", "100.5348"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"formatted\": \"3.7km\""))
        .stdout(predicate::str::contains("\"latitude\": 13.7563"));
}

#[test]
fn distance_rejects_out_of_range_latitude() {
    safesus()
        .args(["distance", "95", "100.5", "13.7", "100.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate").and(predicate::str::contains("code 10002")));
}

#[test]
fn unknown_format_is_a_usage_error() {
    safesus()
        .args(["--format", "xml", "distance", "0", "0", "0", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn help_lists_commands() {
    safesus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nearby"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("distance"));
}
