use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_sound_export_writes_mono_wav() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("turn.wav");

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["sound", "export"])
        .arg(&wav)
        .args(["--seed", "7", "--sample-rate", "8000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1200 samples"));

    let reader = hound::WavReader::open(&wav).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 1200);
}

#[test]
fn test_sound_export_is_reproducible_with_seed() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");

    for path in [&a, &b] {
        cargo_bin_cmd!("folio")
            .env("FOLIO_HOME", dir.path())
            .args(["sound", "export"])
            .arg(path)
            .args(["--seed", "42"])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn test_sound_export_rejects_zero_sample_rate() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["sound", "export"])
        .arg(dir.path().join("x.wav"))
        .args(["--sample-rate", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sample rate"));
}

#[test]
fn test_sound_export_rejects_rate_below_filter_cutoff() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("low.wav");

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["sound", "export"])
        .arg(&wav)
        .args(["--sample-rate", "1600"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1601 Hz"));

    assert!(!wav.exists());
}
