//! Unit tests for configuration loading and layering

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use termreel::{Config, DelaySetting, PlaybackConfig, PlayerOptions, Recording, ReplayStrategy};

use super::helpers::{fixtures_dir, temp_file};

#[test]
fn missing_config_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn playback_table_is_read() {
    let (_temp, path) = temp_file(
        "config.toml",
        r#"
[playback]
frame_delay = "auto"
max_idle_time = 500
speed_factor = 0.5
strategy = "sequential"
render_timeout_ms = 2000
"#,
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.playback.frame_delay, Some(DelaySetting::Auto));
    assert_eq!(
        config.playback.max_idle_time,
        Some(DelaySetting::Millis(500.0))
    );
    assert_eq!(config.playback.speed_factor, Some(0.5));
    assert_eq!(config.playback.strategy, Some(ReplayStrategy::Sequential));
    assert_eq!(config.playback.render_timeout_ms, Some(2000));
    assert_eq!(config.playback.repeat, None);
}

#[test]
fn malformed_config_reports_the_path() {
    let (_temp, path) = temp_file("config.toml", "[playback\nspeed_factor = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn save_then_load_keeps_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let config = Config {
        playback: PlaybackConfig {
            repeat: Some(true),
            thumbnail_time: Some(1200.0),
            ..PlaybackConfig::default()
        },
    };

    config.save_to(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("repeat = true"));

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn user_layer_sits_between_recording_and_flags() {
    let recording = Recording::load(fixtures_dir().join("demo.json")).unwrap();
    let user = PlaybackConfig {
        max_idle_time: Some(DelaySetting::Millis(1000.0)),
        speed_factor: Some(2.0),
        render_timeout_ms: Some(250),
        ..PlaybackConfig::default()
    };
    let flags = PlaybackConfig {
        speed_factor: Some(0.5),
        ..PlaybackConfig::default()
    };

    let options = PlayerOptions::resolve(&recording.config, &[&user, &flags]).unwrap();

    assert_eq!(options.timing.max_idle_time, DelaySetting::Millis(1000.0));
    assert_eq!(options.timing.speed_factor, 0.5);
    assert_eq!(options.render_timeout, Some(Duration::from_millis(250)));
    assert_eq!((options.cols, options.rows), (40, 6));
}

#[test]
fn non_finite_thumbnail_time_is_rejected() {
    let options = PlayerOptions {
        thumbnail_time: f64::NAN,
        ..PlayerOptions::default()
    };
    assert!(options.validate().is_err());
}
