//! Integration tests for the termreel command line

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::termreel;

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn play_help_shows_controls_and_timing_flags() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONTROLS"))
        .stdout(predicate::str::contains("--max-idle-time"))
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("<FILE>"));
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn info_summarizes_recording() {
    let config = TempDir::new().unwrap();
    let output = termreel(&config)
        .args(["info", "demo.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
    File:      demo.json
    Frames:    5
    Duration:  00:02 (2750 ms)
    Recorded:  00:04 (4250 ms)
    Size:      40x6
    Strategy:  snapshot
    Thumbnail: replayed
    ");
}

#[test]
fn info_frames_lists_the_timeline() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "demo.json", "--frames"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    #     start  duration  content"))
        .stdout(predicate::str::contains("    1       400       120  ls\n"))
        .stdout(predicate::str::contains("    2       520        80  \\r\\n\n"))
        .stdout(predicate::str::contains(
            "    4      2600       150  \\u{1b}[1;32m$\\u{1b}[0m \n",
        ));
}

#[test]
fn timing_flags_override_the_recording() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "demo.json", "--speed", "0.5", "--strategy", "sequential"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration:  00:01 (1375 ms)"))
        .stdout(predicate::str::contains("Strategy:  sequential"));
}

#[test]
fn user_config_sits_below_flags() {
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[playback]\nframe_delay = 100\nstrategy = \"sequential\"\n",
    )
    .unwrap();

    termreel(&config)
        .args(["info", "demo.json", "--strategy", "snapshot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration:  00:00 (500 ms)"))
        .stdout(predicate::str::contains("Strategy:  snapshot"));
}

#[test]
fn info_missing_file_fails() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "missing.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found: missing.json"));
}

#[test]
fn info_broken_file_reports_parse_error() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse recording"));
}

#[test]
fn info_empty_recording_is_rejected() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "empty.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recording has no frames"));
}

#[test]
fn invalid_speed_is_rejected() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["info", "demo.json", "--speed=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("speedFactor"));
}

// ============================================================================
// Play Command Tests
// ============================================================================

#[test]
fn play_missing_file_fails_before_touching_the_terminal() {
    let config = TempDir::new().unwrap();
    termreel(&config)
        .args(["play", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: missing.json"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn config_path_honors_environment() {
    let config = TempDir::new().unwrap();
    let expected = config.path().join("config.toml");
    termreel(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn config_show_without_file_prints_defaults() {
    let config = TempDir::new().unwrap();
    let output = termreel(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
    # No playback options set, defaults are in use
    [playback]
    ");
}

#[test]
fn config_show_prints_user_values() {
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[playback]\nmax_idle_time = \"auto\"\nrepeat = true\n",
    )
    .unwrap();

    termreel(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_idle_time = \"auto\""))
        .stdout(predicate::str::contains("repeat = true"))
        .stdout(predicate::str::contains("defaults are in use").not());
}
