//! Terminal buffer data types.
//!
//! - Color: default, palette index (0-255) or RGB
//! - CellStyle: pen attributes
//! - Cell: a character with its style
//! - BufferSnapshot: a full capture of a terminal buffer

use serde::{Deserialize, Serialize};

/// Cell color. The 16 ANSI colors are palette indexes 0-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// Style attributes for a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn is_default(&self) -> bool {
        *self == CellStyle::default()
    }
}

/// A single cell in the terminal buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "ch")]
    pub char: char,
    #[serde(default, skip_serializing_if = "CellStyle::is_default")]
    pub style: CellStyle,
}

impl Cell {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.char == ' ' && self.style.is_default()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Full state of a terminal buffer at one instant.
///
/// Restoring a snapshot onto a surface of the same size reproduces the
/// visible grid, scrollback, cursor and pen exactly. Escape-sequence parser
/// state is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// Visible grid, top row first.
    pub lines: Vec<Vec<Cell>>,
    /// Lines scrolled off the top, oldest first.
    #[serde(default)]
    pub scrollback: Vec<Vec<Cell>>,
    #[serde(default)]
    pub cursor_x: usize,
    #[serde(default)]
    pub cursor_y: usize,
    #[serde(default)]
    pub cursor_hidden: bool,
    #[serde(default)]
    pub pen: CellStyle,
    #[serde(default)]
    pub saved_cursor: Option<(usize, usize)>,
    /// `(top, bottom)` rows, inclusive. `None` is the full screen.
    #[serde(default)]
    pub scroll_region: Option<(usize, usize)>,
}

impl BufferSnapshot {
    /// Visible text without colors: trailing spaces trimmed from each row,
    /// trailing empty rows dropped.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = self.lines.iter().map(|row| row_text(row)).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

pub(crate) fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(|c| c.char)
        .collect::<String>()
        .trim_end()
        .to_string()
}
