//! Smoke tests for command wiring and fail-fast configuration

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run from an empty directory with no backend variables set.
fn resumematch(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resumematch").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MONGO_URI")
        .env_remove("JWT_SECRET")
        .env_remove("BIND_ADDR")
        .env_remove("CORS_ORIGIN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed-admin"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-origin"))
        .stdout(predicate::str::contains("env: CORS_ORIGIN"))
        .stdout(predicate::str::contains("env: BIND_ADDR"));
}

#[test]
fn test_bad_bind_addr_from_env_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("serve")
        .env("BIND_ADDR", "not-an-addr")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));
}

#[test]
fn test_seed_admin_takes_no_arguments() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("seed-admin")
        .arg("--email")
        .arg("x@example.com")
        .assert()
        .failure();
}

#[test]
fn test_serve_without_mongo_uri_fails_fast() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("serve")
        .env("JWT_SECRET", "s3cret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MONGO_URI is not set"));
}

#[test]
fn test_seed_admin_without_mongo_uri_fails_fast() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("seed-admin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MONGO_URI"));
}

#[test]
fn test_serve_rejects_placeholder_secret() {
    let dir = TempDir::new().unwrap();
    resumematch(&dir)
        .arg("serve")
        .env("MONGO_URI", "mongodb://127.0.0.1:1")
        .env("JWT_SECRET", "devsecret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_SECRET is invalid"));
}

#[test]
fn test_dotenv_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "MONGO_URI=mongodb://127.0.0.1:1\n").unwrap();

    // MONGO_URI now comes from .env, so the next missing value is reported
    resumematch(&dir)
        .arg("seed-admin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_SECRET is not set"));
}
