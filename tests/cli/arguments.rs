use crate::helpers::cli::CliTestHelper;
use predicates::prelude::*;

#[test]
fn test_help_lists_connection_and_output_flags() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--schemas"))
        .stdout(predicate::str::contains("--dbtype"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--relations"))
        .stdout(predicate::str::contains("--config-file"));
}

#[test]
fn test_version_flag() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("db-descriptor"));
}

#[test]
fn test_port_must_be_numeric() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--tables")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
