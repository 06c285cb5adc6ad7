//! Viewport rendering for the interactive player.
//!
//! Draws the top-left corner of the virtual terminal into the real one.

use std::fmt::Write as _;

use crate::surface::{CellStyle, Color, VtSurface};

fn push_color(color: Color, foreground: bool, out: &mut String) {
    let base = if foreground { 38 } else { 48 };
    match color {
        Color::Default => {}
        Color::Indexed(i) if i < 8 => {
            let _ = write!(out, "\x1b[{}m", base - 8 + i as u16);
        }
        Color::Indexed(i) if i < 16 => {
            let _ = write!(out, "\x1b[{}m", base + 52 + (i - 8) as u16);
        }
        Color::Indexed(i) => {
            let _ = write!(out, "\x1b[{};5;{}m", base, i);
        }
        Color::Rgb(r, g, b) => {
            let _ = write!(out, "\x1b[{};2;{};{};{}m", base, r, g, b);
        }
    }
}

/// Append the SGR sequence selecting `style` from a reset pen.
pub(crate) fn push_style(style: &CellStyle, out: &mut String) {
    out.push_str("\x1b[0m");
    push_color(style.fg, true, out);
    push_color(style.bg, false, out);
    for (on, code) in [
        (style.bold, 1),
        (style.dim, 2),
        (style.italic, 3),
        (style.underline, 4),
        (style.reverse, 7),
    ] {
        if on {
            let _ = write!(out, "\x1b[{}m", code);
        }
    }
}

/// Render `view_rows` x `view_cols` of the surface, padding with blanks.
pub fn render_viewport(out: &mut String, surface: &VtSurface, view_rows: usize, view_cols: usize) {
    for view_row in 0..view_rows {
        let _ = write!(out, "\x1b[{};1H", view_row + 1);

        let row = surface.row(view_row).unwrap_or(&[]);
        let mut pen = CellStyle::default();
        for col in 0..view_cols {
            match row.get(col) {
                Some(cell) => {
                    if cell.style != pen {
                        push_style(&cell.style, out);
                        pen = cell.style;
                    }
                    out.push(cell.char);
                }
                None => {
                    if !pen.is_default() {
                        out.push_str("\x1b[0m");
                        pen = CellStyle::default();
                    }
                    out.push(' ');
                }
            }
        }
        if !pen.is_default() {
            out.push_str("\x1b[0m");
        }
    }
}
