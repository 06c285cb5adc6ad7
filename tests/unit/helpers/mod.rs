//! Test helper utilities

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::task::Poll;

use tempfile::TempDir;
use termreel::{
    BufferSnapshot, ExecMode, Frame, FrameHook, HookResult, ManualClock, Player, PlayerEvent,
    PlayerOptions, RawFrame, Recording, RenderSurface, ReplayStrategy, VtSurface,
};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Write `contents` to a file in a fresh temporary directory
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write temp file");
    (temp_dir, path)
}

/// One operation observed by [`ScriptedSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Write(String, ExecMode),
    Reset(ExecMode),
    ApplySnapshot,
}

/// A [`VtSurface`] whose settling can be held back, with an operation log.
pub struct ScriptedSurface {
    pub inner: VtSurface,
    pub ops: Vec<SurfaceOp>,
    /// While set, `poll_settled` reports pending work and applies nothing.
    pub stalled: bool,
}

impl ScriptedSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            inner: VtSurface::new(cols, rows),
            ops: Vec::new(),
            stalled: false,
        }
    }

    pub fn text(&self) -> String {
        self.inner.to_string()
    }

    pub fn writes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Write(content, _) => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for ScriptedSurface {
    fn write(&mut self, content: &str, mode: ExecMode) {
        self.ops.push(SurfaceOp::Write(content.to_string(), mode));
        self.inner.write(content, mode);
    }

    fn reset(&mut self, mode: ExecMode) {
        self.ops.push(SurfaceOp::Reset(mode));
        self.inner.reset(mode);
    }

    fn poll_settled(&mut self) -> bool {
        if self.stalled {
            return false;
        }
        self.inner.poll_settled()
    }

    fn snapshot(&self) -> BufferSnapshot {
        self.inner.snapshot()
    }

    fn apply_snapshot(&mut self, snapshot: &BufferSnapshot) {
        self.ops.push(SurfaceOp::ApplySnapshot);
        self.inner.apply_snapshot(snapshot);
    }
}

pub type TestPlayer = Player<ScriptedSurface, ManualClock>;

/// Events collected by a listener registered before construction.
pub type EventLog = Rc<RefCell<Vec<PlayerEvent>>>;

/// Build a recording from `(content, delay)` pairs.
pub fn recording(frames: &[(&str, f64)]) -> Recording {
    Recording::new(
        frames
            .iter()
            .map(|&(content, delay)| RawFrame::new(content, delay))
            .collect(),
    )
}

/// `a`, `b`, `c` with delays 200/300/100.
///
/// Frame intervals: `[0, 300)`, `[300, 400)`, `[400, 600)`.
pub fn abc_recording() -> Recording {
    recording(&[("a", 200.0), ("b", 300.0), ("c", 100.0)])
}

/// Options for a 10x3 surface.
pub fn options(strategy: ReplayStrategy) -> PlayerOptions {
    PlayerOptions {
        strategy,
        cols: 10,
        rows: 3,
        ..PlayerOptions::default()
    }
}

/// Build a player over a scripted surface and a manual clock.
pub fn build_player(
    recording: Recording,
    options: PlayerOptions,
) -> (TestPlayer, ManualClock, EventLog) {
    let clock = ManualClock::new();
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let surface = ScriptedSurface::new(options.cols, options.rows);
    let player = Player::builder(recording)
        .options(options)
        .on_event(move |n| sink.borrow_mut().push(n.event))
        .build(surface, clock.clone())
        .unwrap();
    (player, clock, events)
}

/// Lifecycle event names in emission order, progress updates left out.
pub fn lifecycle(events: &EventLog) -> Vec<&'static str> {
    events
        .borrow()
        .iter()
        .filter(|e| e.is_lifecycle())
        .map(|e| e.name())
        .collect()
}

/// Advance the clock and tick once.
pub fn step(player: &mut TestPlayer, clock: &ManualClock, ms: u64) {
    clock.advance_ms(ms);
    player.tick().unwrap();
}

/// A hook that stays pending until its gate opens.
pub struct GatedHook {
    pub open: Rc<Cell<bool>>,
    pub calls: Rc<RefCell<Vec<usize>>>,
}

impl GatedHook {
    pub fn new() -> (Self, Rc<Cell<bool>>, Rc<RefCell<Vec<usize>>>) {
        let open = Rc::new(Cell::new(false));
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                open: Rc::clone(&open),
                calls: Rc::clone(&calls),
            },
            open,
            calls,
        )
    }
}

impl FrameHook for GatedHook {
    fn start(&mut self, frame: &Frame, index: usize) -> Poll<HookResult> {
        self.calls.borrow_mut().push(index);
        self.poll(frame, index)
    }

    fn poll(&mut self, _frame: &Frame, _index: usize) -> Poll<HookResult> {
        if self.open.get() {
            Poll::Ready(Ok(()))
        } else {
            Poll::Pending
        }
    }
}
