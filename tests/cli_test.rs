//! Tests for the binary's argument handling.
//!
//! These never leave a server running: every case either prints help or
//! fails before (or while) binding.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn get_cmd() -> Command {
    Command::cargo_bin("xml2json-service").unwrap()
}

#[test]
fn test_help_lists_options() {
    get_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--port")
                .and(predicate::str::contains("--path"))
                .and(predicate::str::contains("--keep-strings"))
                .and(predicate::str::contains("--max-body-bytes")),
        );
}

#[test]
fn test_relative_path_is_rejected() {
    get_cmd()
        .args(["--path", "convert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration Error"));
}

#[test]
fn test_out_of_range_port_is_rejected() {
    get_cmd().args(["--port", "70000"]).assert().failure();
}

#[test]
fn test_bind_failure_exits_with_error() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    get_cmd()
        .args(["--bind", "127.0.0.1", "--port", &port.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to bind"));
}
