//! Unit tests for timeline building and frame lookup

use termreel::config::TimingConfig;
use termreel::{DelaySetting, PlayerOptions, RawFrame, Recording, Timeline};

use super::helpers::fixtures_dir;

fn build(delays: &[f64], timing: TimingConfig) -> Timeline {
    let raw = delays
        .iter()
        .enumerate()
        .map(|(i, &d)| RawFrame::new(((b'A' + i as u8) as char).to_string(), d))
        .collect();
    Timeline::build(raw, &timing).unwrap()
}

fn starts(timeline: &Timeline) -> Vec<f64> {
    timeline.frames().iter().map(|f| f.start_time).collect()
}

fn durations(timeline: &Timeline) -> Vec<f64> {
    timeline.frames().iter().map(|f| f.duration).collect()
}

#[test]
fn each_frame_lasts_until_the_next_one_is_due() {
    let timeline = build(&[100.0, 200.0, 300.0], TimingConfig::default());

    assert_eq!(durations(&timeline), vec![200.0, 300.0, 100.0]);
    assert_eq!(starts(&timeline), vec![0.0, 200.0, 500.0]);
    assert_eq!(timeline.frame(2).unwrap().end_time, 600.0);
    assert_eq!(timeline.total_duration(), 600.0);
}

#[test]
fn fixed_frame_delay_replaces_recorded_delays() {
    let timing = TimingConfig {
        frame_delay: DelaySetting::Millis(50.0),
        ..TimingConfig::default()
    };
    let timeline = build(&[100.0, 200.0, 300.0], timing);

    assert_eq!(durations(&timeline), vec![50.0, 50.0, 50.0]);
    assert_eq!(timeline.total_duration(), 150.0);
}

#[test]
fn speed_factor_scales_after_capping() {
    let timing = TimingConfig {
        frame_delay: DelaySetting::Auto,
        max_idle_time: DelaySetting::Millis(150.0),
        speed_factor: 0.5,
    };
    let timeline = build(&[100.0, 200.0, 300.0], timing);

    assert_eq!(durations(&timeline), vec![75.0, 75.0, 50.0]);
    assert_eq!(timeline.total_duration(), 200.0);
}

#[test]
fn lookup_uses_half_open_intervals() {
    let timeline = build(&[100.0, 200.0, 300.0], TimingConfig::default());

    assert_eq!(timeline.find_frame_at(0.0, 0), Some(0));
    assert_eq!(timeline.find_frame_at(199.9, 0), Some(0));
    assert_eq!(timeline.find_frame_at(200.0, 0), Some(1));
    assert_eq!(timeline.find_frame_at(599.0, 0), Some(2));
    // The end of the timeline belongs to the last frame.
    assert_eq!(timeline.find_frame_at(600.0, 0), Some(2));
    assert_eq!(timeline.find_frame_at(600.1, 0), None);
    assert_eq!(timeline.find_frame_at(-1.0, 0), None);
}

#[test]
fn lookup_from_a_start_index_skips_earlier_frames() {
    let timeline = build(&[100.0, 200.0, 300.0], TimingConfig::default());

    assert_eq!(timeline.find_frame_at(550.0, 1), Some(2));
    assert_eq!(timeline.find_frame_at(100.0, 1), None);
    assert_eq!(timeline.find_frame_at(100.0, 7), None);
}

#[test]
fn is_frame_at_excludes_the_end_boundary() {
    let timeline = build(&[100.0, 200.0, 300.0], TimingConfig::default());

    assert!(timeline.is_frame_at(200.0, 1));
    assert!(!timeline.is_frame_at(500.0, 1));
    assert!(!timeline.is_frame_at(600.0, 2));
    assert!(!timeline.is_frame_at(0.0, 3));
}

#[test]
fn content_range_concatenates_in_order() {
    let timeline = build(&[100.0, 200.0, 300.0], TimingConfig::default());

    assert_eq!(timeline.content_range(0, 2), "ABC");
    assert_eq!(timeline.content_range(1, 9), "BC");
    assert_eq!(timeline.content_range(2, 1), "");
}

#[test]
fn fixture_idle_time_is_capped() {
    let recording = Recording::load(fixtures_dir().join("demo.json")).unwrap();
    let options = PlayerOptions::resolve(&recording.config, &[]).unwrap();
    let timeline = Timeline::build(recording.frames, &options.timing).unwrap();

    let adjusted: Vec<f64> = timeline.frames().iter().map(|f| f.adjusted_delay).collect();
    assert_eq!(adjusted, vec![150.0, 400.0, 120.0, 80.0, 2000.0]);
    assert_eq!(timeline.total_duration(), 2750.0);
}
