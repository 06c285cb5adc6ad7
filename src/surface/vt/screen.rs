//! Grid state and the primitive operations escape sequences map onto.

use std::collections::VecDeque;

use crate::surface::types::{row_text, BufferSnapshot, Cell, CellStyle};

/// Everything a snapshot captures, plus the scrollback bound.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    pub cols: usize,
    pub rows: usize,
    pub grid: Vec<Vec<Cell>>,
    pub scrollback: VecDeque<Vec<Cell>>,
    pub scrollback_limit: usize,
    /// May equal `cols` after the last column is written; the next
    /// printable character wraps.
    pub cursor_x: usize,
    pub cursor_y: usize,
    pub cursor_hidden: bool,
    pub pen: CellStyle,
    pub saved_cursor: Option<(usize, usize)>,
    /// Scroll region rows, inclusive.
    pub scroll_top: usize,
    pub scroll_bottom: usize,
}

impl Screen {
    pub fn new(cols: usize, rows: usize, scrollback_limit: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            grid: vec![vec![Cell::blank(); cols]; rows],
            scrollback: VecDeque::new(),
            scrollback_limit,
            cursor_x: 0,
            cursor_y: 0,
            cursor_hidden: false,
            pen: CellStyle::default(),
            saved_cursor: None,
            scroll_top: 0,
            scroll_bottom: rows - 1,
        }
    }

    /// Back to the power-on state, scrollback included.
    pub fn reset(&mut self) {
        *self = Screen::new(self.cols, self.rows, self.scrollback_limit);
    }

    fn blank_row(&self) -> Vec<Cell> {
        vec![Cell::blank(); self.cols]
    }

    fn last_row(&self) -> usize {
        self.rows - 1
    }

    fn last_col(&self) -> usize {
        self.cols - 1
    }

    // Cursor

    pub fn carriage_return(&mut self) {
        self.cursor_x = 0;
    }

    pub fn backspace(&mut self) {
        self.cursor_x = self.cursor_x.min(self.last_col()).saturating_sub(1);
    }

    pub fn tab(&mut self) {
        let next = (self.cursor_x / 8 + 1) * 8;
        self.cursor_x = next.min(self.last_col());
    }

    /// Index (LF): move down, scrolling the region at its bottom margin.
    pub fn line_feed(&mut self) {
        if self.cursor_y == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor_y < self.last_row() {
            self.cursor_y += 1;
        }
    }

    /// Reverse index (ESC M): move up, scrolling the region at its top margin.
    pub fn reverse_index(&mut self) {
        if self.cursor_y == self.scroll_top {
            self.scroll_down(1);
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
        }
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor_y = self.cursor_y.saturating_sub(n);
    }

    pub fn move_down(&mut self, n: usize) {
        self.cursor_y = (self.cursor_y + n).min(self.last_row());
    }

    pub fn move_forward(&mut self, n: usize) {
        self.cursor_x = (self.cursor_x + n).min(self.last_col());
    }

    pub fn move_back(&mut self, n: usize) {
        self.cursor_x = self.cursor_x.min(self.last_col()).saturating_sub(n);
    }

    /// Absolute positioning, 0-indexed, clamped to the screen.
    pub fn goto(&mut self, x: usize, y: usize) {
        self.cursor_x = x.min(self.last_col());
        self.cursor_y = y.min(self.last_row());
    }

    pub fn goto_col(&mut self, x: usize) {
        self.cursor_x = x.min(self.last_col());
    }

    pub fn goto_row(&mut self, y: usize) {
        self.cursor_y = y.min(self.last_row());
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some((self.cursor_x, self.cursor_y));
    }

    pub fn restore_cursor(&mut self) {
        if let Some((x, y)) = self.saved_cursor {
            self.goto(x, y);
        }
    }

    // Text

    pub fn put_char(&mut self, c: char, width: usize) {
        if width == 0 {
            return;
        }
        if self.cursor_x + width > self.cols {
            self.carriage_return();
            self.line_feed();
        }
        let style = self.pen;
        let (x, y) = (self.cursor_x, self.cursor_y);
        self.grid[y][x] = Cell { char: c, style };
        self.cursor_x += 1;
        // The second half of a wide character is a styled blank.
        if width == 2 && self.cursor_x < self.cols {
            self.grid[y][self.cursor_x] = Cell { char: ' ', style };
            self.cursor_x += 1;
        }
    }

    // Erasing

    fn clear_cells(&mut self, y: usize, from: usize, to: usize) {
        let end = to.min(self.cols);
        if let Some(row) = self.grid.get_mut(y) {
            for cell in row.iter_mut().take(end).skip(from) {
                *cell = Cell::blank();
            }
        }
    }

    /// CSI J
    pub fn erase_display(&mut self, mode: u16) {
        let y = self.cursor_y;
        match mode {
            0 => {
                self.erase_line(0);
                for row in y + 1..self.rows {
                    self.clear_cells(row, 0, self.cols);
                }
            }
            1 => {
                for row in 0..y {
                    self.clear_cells(row, 0, self.cols);
                }
                self.erase_line(1);
            }
            2 => {
                for row in 0..self.rows {
                    self.clear_cells(row, 0, self.cols);
                }
            }
            3 => self.scrollback.clear(),
            _ => {}
        }
    }

    /// CSI K
    pub fn erase_line(&mut self, mode: u16) {
        let (x, y) = (self.cursor_x, self.cursor_y);
        match mode {
            0 => self.clear_cells(y, x, self.cols),
            1 => self.clear_cells(y, 0, x + 1),
            2 => self.clear_cells(y, 0, self.cols),
            _ => {}
        }
    }

    /// CSI X: blank `n` cells from the cursor without moving it.
    pub fn erase_chars(&mut self, n: usize) {
        let (x, y) = (self.cursor_x, self.cursor_y);
        self.clear_cells(y, x, x + n);
    }

    /// CSI @
    pub fn insert_chars(&mut self, n: usize) {
        let x = self.cursor_x.min(self.last_col());
        let cols = self.cols;
        let row = &mut self.grid[self.cursor_y];
        let n = n.min(cols - x);
        row[x..].rotate_right(n);
        for cell in &mut row[x..x + n] {
            *cell = Cell::blank();
        }
    }

    /// CSI P
    pub fn delete_chars(&mut self, n: usize) {
        let x = self.cursor_x.min(self.last_col());
        let cols = self.cols;
        let row = &mut self.grid[self.cursor_y];
        let n = n.min(cols - x);
        row[x..].rotate_left(n);
        for cell in &mut row[cols - n..] {
            *cell = Cell::blank();
        }
    }

    fn in_region(&self) -> bool {
        (self.scroll_top..=self.scroll_bottom).contains(&self.cursor_y)
    }

    /// CSI L
    pub fn insert_lines(&mut self, n: usize) {
        if !self.in_region() {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_y + 1);
        for _ in 0..n {
            self.grid.remove(self.scroll_bottom);
            self.grid.insert(self.cursor_y, self.blank_row());
        }
        self.cursor_x = 0;
    }

    /// CSI M
    pub fn delete_lines(&mut self, n: usize) {
        if !self.in_region() {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_y + 1);
        for _ in 0..n {
            self.grid.remove(self.cursor_y);
            self.grid.insert(self.scroll_bottom, self.blank_row());
        }
        self.cursor_x = 0;
    }

    // Scrolling

    /// Scroll the region up. Lines leaving the top of the screen go to
    /// scrollback.
    pub fn scroll_up(&mut self, n: usize) {
        let n = n.min(self.scroll_bottom - self.scroll_top + 1);
        for _ in 0..n {
            let line = self.grid.remove(self.scroll_top);
            if self.scroll_top == 0 && self.scrollback_limit > 0 {
                self.scrollback.push_back(line);
                if self.scrollback.len() > self.scrollback_limit {
                    self.scrollback.pop_front();
                }
            }
            self.grid.insert(self.scroll_bottom, self.blank_row());
        }
    }

    pub fn scroll_down(&mut self, n: usize) {
        let n = n.min(self.scroll_bottom - self.scroll_top + 1);
        for _ in 0..n {
            self.grid.remove(self.scroll_bottom);
            self.grid.insert(self.scroll_top, self.blank_row());
        }
    }

    /// DECSTBM, 0-indexed inclusive rows. Invalid regions are ignored.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(self.last_row());
        if top < bottom {
            self.scroll_top = top;
            self.scroll_bottom = bottom;
            self.goto(0, 0);
        }
    }

    // Snapshots

    pub fn snapshot(&self) -> BufferSnapshot {
        let full_screen = self.scroll_top == 0 && self.scroll_bottom == self.last_row();
        BufferSnapshot {
            cols: self.cols,
            rows: self.rows,
            lines: self.grid.clone(),
            scrollback: self.scrollback.iter().cloned().collect(),
            cursor_x: self.cursor_x,
            cursor_y: self.cursor_y,
            cursor_hidden: self.cursor_hidden,
            pen: self.pen,
            saved_cursor: self.saved_cursor,
            scroll_region: (!full_screen).then_some((self.scroll_top, self.scroll_bottom)),
        }
    }

    /// Restore a snapshot. A snapshot taken at another size is cropped or
    /// padded to this screen.
    pub fn restore(&mut self, snapshot: &BufferSnapshot) {
        let fit = |line: &Vec<Cell>, cols: usize| -> Vec<Cell> {
            let mut row: Vec<Cell> = line.iter().take(cols).copied().collect();
            row.resize(cols, Cell::blank());
            row
        };

        let mut grid: Vec<Vec<Cell>> = snapshot
            .lines
            .iter()
            .take(self.rows)
            .map(|line| fit(line, self.cols))
            .collect();
        grid.resize(self.rows, self.blank_row());
        self.grid = grid;

        let skip = snapshot
            .scrollback
            .len()
            .saturating_sub(self.scrollback_limit);
        self.scrollback = snapshot
            .scrollback
            .iter()
            .skip(skip)
            .map(|line| fit(line, self.cols))
            .collect();

        self.cursor_x = snapshot.cursor_x.min(self.cols);
        self.cursor_y = snapshot.cursor_y.min(self.last_row());
        self.cursor_hidden = snapshot.cursor_hidden;
        self.pen = snapshot.pen;
        self.saved_cursor = snapshot.saved_cursor;
        let (top, bottom) = snapshot
            .scroll_region
            .filter(|&(top, bottom)| top < bottom && bottom < self.rows)
            .unwrap_or((0, self.last_row()));
        self.scroll_top = top;
        self.scroll_bottom = bottom;
    }

    pub fn text(&self) -> String {
        let mut lines: Vec<String> = self.grid.iter().map(|row| row_text(row)).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}
