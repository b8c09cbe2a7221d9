//! Double-buffered screen rendering
//! Minimizes flicker by only updating changed cells

use crate::terminal::{Color, Terminal};
use std::io;

/// A single cell on the screen
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::LightGray,
            bg: Color::Black,
        }
    }
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

/// Double-buffered screen
pub struct Screen {
    width: u16,
    height: u16,
    front: Vec<Cell>, // Currently displayed
    back: Vec<Cell>,  // Being drawn to
    cursor_row: u16,
    cursor_col: u16,
    cursor_visible: bool,
}

impl Screen {
    /// Create a new screen with given dimensions
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);

        Self {
            width,
            height,
            front: vec![Cell::new('\0', Color::Black, Color::Black); size], // Force initial draw
            back: vec![Cell::default(); size],
            cursor_row: 1,
            cursor_col: 1,
            cursor_visible: false,
        }
    }

    /// Get screen dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize the screen
    pub fn resize(&mut self, width: u16, height: u16) {
        let size = (width as usize) * (height as usize);

        self.width = width;
        self.height = height;
        self.front = vec![Cell::new('\0', Color::Black, Color::Black); size];
        self.back = vec![Cell::default(); size];
    }

    /// Convert row/col to buffer index (1-based coordinates)
    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= 1 && row <= self.height && col >= 1 && col <= self.width {
            Some(((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize))
        } else {
            None
        }
    }

    /// Set a cell in the back buffer
    pub fn set(&mut self, row: u16, col: u16, ch: char, fg: Color, bg: Color) {
        if let Some(idx) = self.index(row, col) {
            self.back[idx] = Cell::new(ch, fg, bg);
        }
    }

    /// Write a string to the back buffer starting at given position
    pub fn write_str(&mut self, row: u16, col: u16, s: &str, fg: Color, bg: Color) {
        let mut c = col;
        for ch in s.chars() {
            if c > self.width {
                break;
            }
            self.set(row, c, ch, fg, bg);
            c += 1;
        }
    }

    /// Clear with specific colors
    pub fn clear_with(&mut self, fg: Color, bg: Color) {
        let cell = Cell::new(' ', fg, bg);
        self.back.fill(cell);
    }

    /// Draw a single-line box with filled interior
    pub fn draw_box(&mut self, row: u16, col: u16, width: u16, height: u16, fg: Color, bg: Color) {
        if width < 2 || height < 2 {
            return;
        }

        self.set(row, col, '┌', fg, bg);
        self.set(row, col + width - 1, '┐', fg, bg);
        self.set(row + height - 1, col, '└', fg, bg);
        self.set(row + height - 1, col + width - 1, '┘', fg, bg);

        for c in 1..width - 1 {
            self.set(row, col + c, '─', fg, bg);
            self.set(row + height - 1, col + c, '─', fg, bg);
        }

        for r in 1..height - 1 {
            self.set(row + r, col, '│', fg, bg);
            self.set(row + r, col + width - 1, '│', fg, bg);
        }

        for r in 1..height - 1 {
            for c in 1..width - 1 {
                self.set(row + r, col + c, ' ', fg, bg);
            }
        }
    }

    /// Draw a shadow effect (DOS style - dark area to right and below)
    pub fn draw_shadow(&mut self, row: u16, col: u16, width: u16, height: u16) {
        for r in 1..=height {
            for c in 0..2 {
                if let Some(idx) = self.index(row + r, col + width + c) {
                    // Preserve the character but darken
                    let cell = &mut self.back[idx];
                    cell.fg = Color::DarkGray;
                    cell.bg = Color::Black;
                }
            }
        }

        for c in 2..width + 2 {
            if let Some(idx) = self.index(row + height, col + c) {
                let cell = &mut self.back[idx];
                cell.fg = Color::DarkGray;
                cell.bg = Color::Black;
            }
        }
    }

    /// Set cursor position
    pub fn set_cursor(&mut self, row: u16, col: u16) {
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Flush changes to the terminal (only updates changed cells)
    pub fn flush(&mut self, term: &mut Terminal) -> io::Result<()> {
        let mut last_fg = Color::Black;
        let mut last_bg = Color::Black;
        let mut last_row: u16 = 0;
        let mut last_col: u16 = 0;
        let mut need_move = true;

        for row in 1..=self.height {
            for col in 1..=self.width {
                let idx = ((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize);
                let front = self.front[idx];
                let back = self.back[idx];

                if front != back {
                    if need_move || row != last_row || col != last_col + 1 {
                        term.goto(row, col)?;
                    }

                    if back.fg != last_fg || back.bg != last_bg {
                        term.set_colors(back.fg, back.bg)?;
                        last_fg = back.fg;
                        last_bg = back.bg;
                    }

                    term.write_char(back.ch)?;
                    self.front[idx] = back;

                    last_row = row;
                    last_col = col;
                    need_move = false;
                }
            }
        }

        if self.cursor_visible {
            term.goto(self.cursor_row, self.cursor_col)?;
            term.show_cursor()?;
        } else {
            term.hide_cursor()?;
        }

        term.flush()
    }
}
