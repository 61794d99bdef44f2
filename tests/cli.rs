use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn fxpipe_cmd() -> Command {
    Command::new(cargo_bin("fxpipe"))
}

#[test]
fn test_help() {
    fxpipe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fxpipe"));
}

#[test]
fn test_version() {
    fxpipe_cmd().arg("--version").assert().success();
}

#[test]
fn test_missing_arguments() {
    fxpipe_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_unsupported_input_type() {
    fxpipe_cmd()
        .args(["-i", "notes.txt", "hflip", "out.mp4"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported input file type"));
}

#[test]
fn test_unknown_effect_rejected_before_any_work() {
    // Input does not even exist; validation must fail first.
    fxpipe_cmd()
        .args(["-i", "missing.mp4", "explode=9", "out.mp4"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown effect: explode"));
}

#[test]
fn test_type_mismatch_for_audio_input() {
    fxpipe_cmd()
        .args(["-i", "song.mp3", "hflip", "out.mp3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not support audio"));
}

#[test]
fn test_bad_parameter_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    std::fs::write(&input, b"stub").unwrap();

    fxpipe_cmd()
        .arg("-i")
        .arg(&input)
        .arg("blur=fuzzy")
        .arg(dir.path().join("out.mp4"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid parameter"));
}

#[test]
fn test_nonexistent_input_file() {
    fxpipe_cmd()
        .args(["-i", "no_such_clip.mp4", "hflip", "out.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
