use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("folio")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pages"))
        .stdout(predicate::str::contains("sound"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--no-sound"));
}

#[test]
fn test_sound_help_shows_export() {
    cargo_bin_cmd!("folio")
        .args(["sound", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("folio")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_open_without_terminal_points_to_pages() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("folio pages"));
}
