//! Sequential and snapshot replay must leave identical terminal buffers.

use termreel::config::TimingConfig;
use termreel::{
    ExecMode, ManualClock, Player, RawFrame, Recording, RecordingConfig, RenderSurface,
    ReplayStrategy, SnapshotCache, Timeline, VtSurface,
};

use crate::helpers::{fixtures_dir, vt_player};

type VtPlayer = Player<VtSurface, ManualClock>;

/// A session that scrolls, recolors, clears and hides the cursor in a
/// small window.
fn busy_session() -> Recording {
    let frames = vec![
        RawFrame::new("\x1b[1;32m$\x1b[0m ", 50.0),
        RawFrame::new("make\r\n", 120.0),
        RawFrame::new("\x1b[?25lbuilding \x1b[33mcore\x1b[0m\r\n", 300.0),
        RawFrame::new("building cli\r\nbuilding tests\r\n", 80.0),
        RawFrame::new("[  50%]\r\x1b[K[ 100%]", 250.0),
        RawFrame::new("\r\n\x1b[31merror\x1b[0m: 1 warning\r\n", 60.0),
        RawFrame::new("\x1b[2J\x1b[H\x1b[7mdone\x1b[0m\x1b[?25h", 400.0),
        RawFrame::new("\r\n日本語 ok\r\n$ ", 90.0),
    ];
    Recording::new(frames).with_config(RecordingConfig {
        cols: Some(12),
        rows: Some(4),
        ..RecordingConfig::default()
    })
}

fn pair(recording: &Recording) -> ((VtPlayer, ManualClock), (VtPlayer, ManualClock)) {
    (
        vt_player(recording.clone(), ReplayStrategy::Sequential),
        vt_player(recording.clone(), ReplayStrategy::Snapshot),
    )
}

fn assert_same_buffer(sequential: &VtPlayer, snapshot: &VtPlayer, at: &str) {
    assert_eq!(
        sequential.last_rendered_frame(),
        snapshot.last_rendered_frame(),
        "rendered frame differs {}",
        at
    );
    assert_eq!(
        sequential.surface().snapshot(),
        snapshot.surface().snapshot(),
        "buffer differs {}",
        at
    );
}

fn assert_playback_matches(recording: Recording, step_ms: u64) {
    let ((mut sequential, seq_clock), (mut snapshot, snap_clock)) = pair(&recording);
    sequential.play().unwrap();
    snapshot.play().unwrap();

    let total = sequential.total_duration() as u64;
    let mut elapsed = 0;
    while elapsed <= total + step_ms {
        seq_clock.advance_ms(step_ms);
        snap_clock.advance_ms(step_ms);
        sequential.tick().unwrap();
        snapshot.tick().unwrap();
        elapsed += step_ms;

        assert_same_buffer(&sequential, &snapshot, &format!("at {} ms", elapsed));
    }
    assert!(!sequential.is_playing());
    assert!(!snapshot.is_playing());
}

#[test]
fn fine_grained_playback_matches() {
    assert_playback_matches(busy_session(), 10);
}

#[test]
fn coarse_playback_skipping_frames_matches() {
    assert_playback_matches(busy_session(), 170);
}

#[test]
fn fixture_playback_matches() {
    let recording = Recording::load(fixtures_dir().join("demo.json")).unwrap();
    assert_playback_matches(recording, 45);

    let recording = Recording::load(fixtures_dir().join("frames.json")).unwrap();
    assert_playback_matches(recording, 100);
}

#[test]
fn jumps_in_both_directions_match() {
    let recording = busy_session();
    let ((mut sequential, _), (mut snapshot, _)) = pair(&recording);
    let total = sequential.total_duration();

    let mut targets: Vec<f64> = sequential
        .timeline()
        .frames()
        .iter()
        .map(|frame| frame.start_time)
        .collect();
    targets.extend([total, total / 3.0, 0.0, total * 0.75, 5.0]);

    for time in targets {
        sequential.jump(time).unwrap();
        snapshot.jump(time).unwrap();

        assert_same_buffer(&sequential, &snapshot, &format!("after jump to {}", time));
        assert_eq!(sequential.current_time(), time);
    }
}

#[test]
fn playing_on_after_a_jump_matches() {
    let recording = busy_session();
    let ((mut sequential, seq_clock), (mut snapshot, snap_clock)) = pair(&recording);

    sequential.play().unwrap();
    snapshot.play().unwrap();
    seq_clock.advance_ms(20);
    snap_clock.advance_ms(20);
    sequential.tick().unwrap();
    snapshot.tick().unwrap();

    sequential.jump(500.0).unwrap();
    snapshot.jump(500.0).unwrap();
    assert!(sequential.is_playing());

    for _ in 0..40 {
        seq_clock.advance_ms(35);
        snap_clock.advance_ms(35);
        sequential.tick().unwrap();
        snapshot.tick().unwrap();
        assert_same_buffer(&sequential, &snapshot, "while playing after a jump");
    }
}

#[test]
fn every_snapshot_continues_into_every_later_one() {
    let recording = busy_session();
    let timeline = Timeline::build(recording.frames, &TimingConfig::default()).unwrap();
    let mut surface = VtSurface::new(12, 4);
    let cache = SnapshotCache::build(&timeline, &mut surface, 0);
    let last = timeline.last_index();

    for i in 0..=last {
        for j in i..=last {
            let mut resumed = VtSurface::new(12, 4);
            resumed.apply_snapshot(&cache.get(i).unwrap().buffer);
            if j > i {
                resumed.write(&timeline.content_range(i + 1, j), ExecMode::Immediate);
            }

            assert_eq!(
                resumed.snapshot(),
                cache.get(j).unwrap().buffer,
                "snapshot {} followed by frames {}..={}",
                i,
                i + 1,
                j
            );
        }
    }
}
