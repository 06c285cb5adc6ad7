//! Virtual terminal surface.
//!
//! A VTE-driven terminal buffer that implements [`RenderSurface`]. Deferred
//! writes and resets are queued and applied in order by the next
//! `poll_settled()`, the way a display applies output on its next refresh.
//!
//! Handles printable text (wide characters included), CR/LF/BS/TAB, cursor
//! movement, erase, insert/delete, scroll regions, SGR, save/restore cursor,
//! reverse index, full reset and cursor visibility.

mod performer;
mod screen;
mod sgr;

use std::collections::VecDeque;
use std::fmt;

use vte::Parser;

use super::types::{BufferSnapshot, Cell};
use super::{ExecMode, RenderSurface};
use performer::Performer;
use screen::Screen;

/// Lines kept above the visible grid.
pub const DEFAULT_SCROLLBACK: usize = 1000;

#[derive(Debug)]
enum PendingOp {
    Write(String),
    Reset,
}

/// In-memory terminal display.
pub struct VtSurface {
    screen: Screen,
    parser: Parser,
    pending: VecDeque<PendingOp>,
    /// Bumped on every applied change; lets front-ends skip redundant redraws.
    revision: u64,
}

impl VtSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_scrollback(cols, rows, DEFAULT_SCROLLBACK)
    }

    pub fn with_scrollback(cols: usize, rows: usize, scrollback: usize) -> Self {
        Self {
            screen: Screen::new(cols, rows, scrollback),
            parser: Parser::new(),
            pending: VecDeque::new(),
            revision: 0,
        }
    }

    pub fn cols(&self) -> usize {
        self.screen.cols
    }

    pub fn rows(&self) -> usize {
        self.screen.rows
    }

    /// `(column, row)`, 0-indexed.
    pub fn cursor(&self) -> (usize, usize) {
        (self.screen.cursor_x, self.screen.cursor_y)
    }

    pub fn cursor_hidden(&self) -> bool {
        self.screen.cursor_hidden
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.screen.grid.get(index).map(|r| r.as_slice())
    }

    pub fn scrollback_len(&self) -> usize {
        self.screen.scrollback.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn apply(&mut self, op: PendingOp) {
        match op {
            PendingOp::Write(content) => {
                let mut performer = Performer(&mut self.screen);
                self.parser.advance(&mut performer, content.as_bytes());
            }
            PendingOp::Reset => {
                self.screen.reset();
                self.parser = Parser::new();
            }
        }
        self.revision += 1;
    }

    fn flush(&mut self) {
        while let Some(op) = self.pending.pop_front() {
            self.apply(op);
        }
    }

    fn submit(&mut self, op: PendingOp, mode: ExecMode) {
        match mode {
            ExecMode::Deferred => self.pending.push_back(op),
            ExecMode::Immediate => {
                // Keep operations ordered.
                self.flush();
                self.apply(op);
            }
        }
    }
}

impl RenderSurface for VtSurface {
    fn write(&mut self, content: &str, mode: ExecMode) {
        self.submit(PendingOp::Write(content.to_string()), mode);
    }

    fn reset(&mut self, mode: ExecMode) {
        self.submit(PendingOp::Reset, mode);
    }

    fn poll_settled(&mut self) -> bool {
        self.flush();
        true
    }

    fn snapshot(&self) -> BufferSnapshot {
        self.screen.snapshot()
    }

    fn apply_snapshot(&mut self, snapshot: &BufferSnapshot) {
        self.pending.clear();
        self.screen.restore(snapshot);
        self.parser = Parser::new();
        self.revision += 1;
    }
}

impl fmt::Debug for VtSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VtSurface")
            .field("cols", &self.screen.cols)
            .field("rows", &self.screen.rows)
            .field("pending", &self.pending.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl fmt::Display for VtSurface {
    /// Visible text without colors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.screen.text())
    }
}
