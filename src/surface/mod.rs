//! Rendering surfaces.
//!
//! The player never interprets frame content itself; it hands content to a
//! [`RenderSurface`] and waits for the surface to report that rendering has
//! settled. Surfaces may apply work lazily ([`ExecMode::Deferred`]) or
//! inline ([`ExecMode::Immediate`]); the snapshot cache uses the latter so a
//! one-time replay costs time proportional to the frame count only.
//!
//! # Structure
//!
//! - `types` - Cells, colors and [`BufferSnapshot`]
//! - `vt` - [`VtSurface`], a virtual terminal built on `vte`

mod types;
mod vt;

pub use types::{BufferSnapshot, Cell, CellStyle, Color};
pub use vt::{VtSurface, DEFAULT_SCROLLBACK};

/// When a surface operation takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Queue the work; it is applied by a later [`RenderSurface::poll_settled`].
    Deferred,
    /// Apply the work before returning.
    Immediate,
}

/// A terminal display the player drives.
pub trait RenderSurface {
    /// Write a chunk of terminal output.
    fn write(&mut self, content: &str, mode: ExecMode);

    /// Clear all state: grid, scrollback, cursor, pen.
    fn reset(&mut self, mode: ExecMode);

    /// Make progress on deferred work. Returns true once nothing is pending.
    fn poll_settled(&mut self) -> bool;

    /// Capture the full buffer state.
    fn snapshot(&self) -> BufferSnapshot;

    /// Replace the full buffer state. Synchronous; pending deferred work
    /// is discarded.
    fn apply_snapshot(&mut self, snapshot: &BufferSnapshot);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn write(&mut self, content: &str, mode: ExecMode) {
        (**self).write(content, mode)
    }

    fn reset(&mut self, mode: ExecMode) {
        (**self).reset(mode)
    }

    fn poll_settled(&mut self) -> bool {
        (**self).poll_settled()
    }

    fn snapshot(&self) -> BufferSnapshot {
        (**self).snapshot()
    }

    fn apply_snapshot(&mut self, snapshot: &BufferSnapshot) {
        (**self).apply_snapshot(snapshot)
    }
}
