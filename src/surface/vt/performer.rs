//! `vte::Perform` implementation mapping escape sequences onto [`Screen`].

use tracing::trace;
use unicode_width::UnicodeWidthChar;
use vte::{Params, Perform};

use super::screen::Screen;
use super::sgr::apply_sgr;

pub(crate) struct Performer<'a>(pub &'a mut Screen);

/// Parameter `i`, or `default` when absent or zero.
fn arg(params: &[u16], i: usize, default: u16) -> usize {
    params
        .get(i)
        .copied()
        .filter(|&v| v != 0)
        .unwrap_or(default) as usize
}

impl Performer<'_> {
    fn dec_private_mode(&mut self, params: &[u16], enable: bool) {
        for &mode in params {
            match mode {
                25 => self.0.cursor_hidden = !enable,
                _ => trace!(mode, enable, "Ignoring DEC private mode"),
            }
        }
    }
}

impl Perform for Performer<'_> {
    fn print(&mut self, c: char) {
        let width = c.width().unwrap_or(1);
        self.0.put_char(c, width);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' | 0x0b | 0x0c => self.0.line_feed(),
            b'\r' => self.0.carriage_return(),
            0x08 => self.0.backspace(),
            b'\t' => self.0.tab(),
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        let groups: Vec<&[u16]> = params.iter().collect();
        let flat: Vec<u16> = groups
            .iter()
            .map(|p| p.first().copied().unwrap_or(0))
            .collect();

        if intermediates.first() == Some(&b'?') {
            match action {
                'h' => self.dec_private_mode(&flat, true),
                'l' => self.dec_private_mode(&flat, false),
                _ => trace!(%action, params = ?flat, "Unhandled DEC private sequence"),
            }
            return;
        }
        if !intermediates.is_empty() {
            trace!(%action, ?intermediates, "Unhandled CSI sequence");
            return;
        }

        let screen = &mut *self.0;
        match action {
            'A' => screen.move_up(arg(&flat, 0, 1)),
            'B' => screen.move_down(arg(&flat, 0, 1)),
            'C' => screen.move_forward(arg(&flat, 0, 1)),
            'D' => screen.move_back(arg(&flat, 0, 1)),
            'H' | 'f' => screen.goto(arg(&flat, 1, 1) - 1, arg(&flat, 0, 1) - 1),
            'G' => screen.goto_col(arg(&flat, 0, 1) - 1),
            'd' => screen.goto_row(arg(&flat, 0, 1) - 1),
            'J' => screen.erase_display(flat.first().copied().unwrap_or(0)),
            'K' => screen.erase_line(flat.first().copied().unwrap_or(0)),
            'X' => screen.erase_chars(arg(&flat, 0, 1)),
            '@' => screen.insert_chars(arg(&flat, 0, 1)),
            'P' => screen.delete_chars(arg(&flat, 0, 1)),
            'L' => screen.insert_lines(arg(&flat, 0, 1)),
            'M' => screen.delete_lines(arg(&flat, 0, 1)),
            'S' => screen.scroll_up(arg(&flat, 0, 1)),
            'T' => screen.scroll_down(arg(&flat, 0, 1)),
            'r' => {
                let rows = screen.rows as u16;
                screen.set_scroll_region(arg(&flat, 0, 1) - 1, arg(&flat, 1, rows) - 1);
            }
            'm' => apply_sgr(&mut screen.pen, &groups),
            's' => screen.save_cursor(),
            'u' => screen.restore_cursor(),
            _ => trace!(%action, params = ?flat, "Unhandled CSI sequence"),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        if !intermediates.is_empty() {
            // Charset designation and the like.
            return;
        }
        match byte {
            b'7' => self.0.save_cursor(),
            b'8' => self.0.restore_cursor(),
            b'D' => self.0.line_feed(),
            b'E' => {
                self.0.carriage_return();
                self.0.line_feed();
            }
            b'M' => self.0.reverse_index(),
            b'c' => self.0.reset(),
            _ => trace!(byte_char = %char::from(byte), "Unhandled ESC sequence"),
        }
    }
}
