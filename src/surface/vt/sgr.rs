//! SGR (CSI m) parsing.
//!
//! Extended colors arrive either as subparameters (`38:2:r:g:b`,
//! `38:2:cs:r:g:b`, `38:5:n`) or as separate parameters (`38;2;r;g;b`,
//! `38;5;n`). Both forms are accepted.

use crate::surface::types::{CellStyle, Color};

/// Apply one SGR sequence to the pen. `params` holds one slice per
/// `;`-separated parameter, each with its `:` subparameters.
pub(crate) fn apply_sgr(pen: &mut CellStyle, params: &[&[u16]]) {
    if params.is_empty() {
        *pen = CellStyle::default();
        return;
    }

    let mut rest = params;
    while let Some((param, tail)) = rest.split_first() {
        rest = tail;
        let code = param.first().copied().unwrap_or(0);
        match code {
            0 => *pen = CellStyle::default(),
            1 => pen.bold = true,
            2 => pen.dim = true,
            3 => pen.italic = true,
            4 => pen.underline = true,
            7 => pen.reverse = true,
            22 => {
                pen.bold = false;
                pen.dim = false;
            }
            23 => pen.italic = false,
            24 => pen.underline = false,
            27 => pen.reverse = false,
            30..=37 => pen.fg = Color::Indexed((code - 30) as u8),
            39 => pen.fg = Color::Default,
            40..=47 => pen.bg = Color::Indexed((code - 40) as u8),
            49 => pen.bg = Color::Default,
            90..=97 => pen.fg = Color::Indexed((code - 90 + 8) as u8),
            100..=107 => pen.bg = Color::Indexed((code - 100 + 8) as u8),
            38 | 48 => {
                let color = if param.len() > 1 {
                    color_from_subparams(&param[1..])
                } else {
                    let (color, consumed) = color_from_params(rest);
                    rest = &rest[consumed..];
                    color
                };
                if let Some(color) = color {
                    if code == 38 {
                        pen.fg = color;
                    } else {
                        pen.bg = color;
                    }
                }
            }
            _ => {}
        }
    }
}

fn channel(value: u16) -> u8 {
    value.min(255) as u8
}

fn color_from_subparams(sub: &[u16]) -> Option<Color> {
    match sub {
        [5, index, ..] => Some(Color::Indexed(channel(*index))),
        [2, _colorspace, r, g, b, ..] => Some(Color::Rgb(channel(*r), channel(*g), channel(*b))),
        [2, r, g, b] => Some(Color::Rgb(channel(*r), channel(*g), channel(*b))),
        _ => None,
    }
}

/// Returns the color and how many following parameters it used.
fn color_from_params(rest: &[&[u16]]) -> (Option<Color>, usize) {
    let value = |i: usize| rest.get(i).and_then(|p| p.first()).copied();
    match value(0) {
        Some(5) => match value(1) {
            Some(index) => (Some(Color::Indexed(channel(index))), 2),
            None => (None, 1),
        },
        Some(2) => {
            let consumed = rest.len().min(4);
            let color = Color::Rgb(
                channel(value(1).unwrap_or(0)),
                channel(value(2).unwrap_or(0)),
                channel(value(3).unwrap_or(0)),
            );
            (Some(color), consumed)
        }
        Some(_) => (None, 1),
        None => (None, 0),
    }
}
