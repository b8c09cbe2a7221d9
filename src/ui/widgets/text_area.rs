//! Multi-line text area widget
//!
//! Used in two modes: an editable area for user comments and a
//! read-only scrolling view for the report text.

use crate::input::{mouse_position, InputEvent};
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::widget::{EventResult, Widget};

/// A bordered multi-line text area with cursor and scrolling
pub struct TextArea {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize, // char index within the line
    top_line: usize,   // first visible line
    left_col: usize,   // first visible column
    read_only: bool,
    focused: bool,
}

impl TextArea {
    /// Create an empty editable text area
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            top_line: 0,
            left_col: 0,
            read_only: false,
            focused: false,
        }
    }

    /// Create a read-only view of the given text
    pub fn read_only(text: &str) -> Self {
        let mut area = Self::new();
        area.read_only = true;
        area.set_text(text);
        area
    }

    /// Replace the entire contents
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.top_line = 0;
        self.left_col = 0;
    }

    /// Get the contents as a single string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    /// Byte offset of a char index within a line
    fn byte_at(line: &str, char_idx: usize) -> usize {
        line.char_indices()
            .nth(char_idx)
            .map_or(line.len(), |(b, _)| b)
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.read_only {
            return;
        }
        let byte = Self::byte_at(&self.lines[self.cursor_line], self.cursor_col);
        self.lines[self.cursor_line].insert(byte, ch);
        self.cursor_col += 1;
    }

    /// Insert text at the cursor, splitting on newlines
    pub fn insert_str(&mut self, text: &str) {
        if self.read_only {
            return;
        }
        for ch in text.chars() {
            match ch {
                '\n' => self.newline(),
                '\r' => {}
                c if c.is_control() => {}
                c => self.insert_char(c),
            }
        }
    }

    pub fn newline(&mut self) {
        if self.read_only {
            return;
        }
        let byte = Self::byte_at(&self.lines[self.cursor_line], self.cursor_col);
        let rest = self.lines[self.cursor_line].split_off(byte);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.read_only {
            return;
        }
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let byte = Self::byte_at(&self.lines[self.cursor_line], self.cursor_col);
            self.lines[self.cursor_line].remove(byte);
        } else if self.cursor_line > 0 {
            // Join with previous line
            let removed = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&removed);
        }
    }

    pub fn delete(&mut self) {
        if self.read_only {
            return;
        }
        if self.cursor_col < self.line_len(self.cursor_line) {
            let byte = Self::byte_at(&self.lines[self.cursor_line], self.cursor_col);
            self.lines[self.cursor_line].remove(byte);
        } else if self.cursor_line + 1 < self.lines.len() {
            let removed = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&removed);
        }
    }

    fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
        }
    }

    fn move_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    fn scroll_up(&mut self, amount: usize) {
        self.top_line = self.top_line.saturating_sub(amount);
    }

    fn scroll_down(&mut self, amount: usize, inner_height: usize) {
        let max_top = self.lines.len().saturating_sub(inner_height);
        self.top_line = (self.top_line + amount).min(max_top);
    }

    fn inner_size(bounds: Rect) -> (usize, usize) {
        (
            bounds.width.saturating_sub(2) as usize,
            bounds.height.saturating_sub(2) as usize,
        )
    }

    /// Adjust scroll so the cursor is within the visible window
    fn ensure_cursor_visible(&mut self, bounds: Rect) {
        let (inner_w, inner_h) = Self::inner_size(bounds);
        if inner_w == 0 || inner_h == 0 {
            return;
        }
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        }
        if self.cursor_line >= self.top_line + inner_h {
            self.top_line = self.cursor_line + 1 - inner_h;
        }
        if self.cursor_col < self.left_col {
            self.left_col = self.cursor_col;
        }
        if self.cursor_col >= self.left_col + inner_w {
            self.left_col = self.cursor_col + 1 - inner_w;
        }
    }

    /// Place the cursor at a screen position inside the bounds
    fn click_at(&mut self, row: u16, col: u16, bounds: Rect) {
        let inner_row = row.saturating_sub(bounds.y + 1) as usize;
        let inner_col = col.saturating_sub(bounds.x + 1) as usize;
        self.cursor_line = (self.top_line + inner_row).min(self.lines.len() - 1);
        self.cursor_col = (self.left_col + inner_col).min(self.line_len(self.cursor_line));
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextArea {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width < 3 || bounds.height < 3 {
            return;
        }

        let (fg, bg) = if self.focused && !self.read_only {
            (theme.text_area_focused_fg, theme.text_area_focused_bg)
        } else {
            (theme.text_area_fg, theme.text_area_bg)
        };

        screen.draw_box(bounds.y, bounds.x, bounds.width, bounds.height, fg, bg);

        let (inner_w, inner_h) = Self::inner_size(bounds);
        for (i, line) in self
            .lines
            .iter()
            .skip(self.top_line)
            .take(inner_h)
            .enumerate()
        {
            let visible: String = line.chars().skip(self.left_col).take(inner_w).collect();
            screen.write_str(bounds.y + 1 + i as u16, bounds.x + 1, &visible, fg, bg);
        }

        // Scroll indicators on the right border
        if self.top_line > 0 {
            screen.set(bounds.y + 1, bounds.x + bounds.width - 1, '▲', fg, bg);
        }
        if self.top_line + inner_h < self.lines.len() {
            screen.set(
                bounds.y + bounds.height - 2,
                bounds.x + bounds.width - 1,
                '▼',
                fg,
                bg,
            );
        }

        if self.focused && !self.read_only {
            let cursor_row = bounds.y + 1 + (self.cursor_line - self.top_line) as u16;
            let cursor_col = bounds.x + 1 + (self.cursor_col - self.left_col) as u16;
            screen.set_cursor(cursor_row, cursor_col);
            screen.set_cursor_visible(true);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        let (_, inner_h) = Self::inner_size(bounds);

        if let Some((row, col)) = mouse_position(event) {
            if !bounds.contains(row, col) {
                return EventResult::Ignored;
            }
            match event {
                InputEvent::MouseClick { .. } => {
                    if !self.read_only {
                        self.click_at(row, col, bounds);
                        self.ensure_cursor_visible(bounds);
                    }
                    return EventResult::Consumed;
                }
                InputEvent::ScrollUp { .. } => {
                    self.scroll_up(1);
                    return EventResult::Consumed;
                }
                InputEvent::ScrollDown { .. } => {
                    self.scroll_down(1, inner_h);
                    return EventResult::Consumed;
                }
                _ => return EventResult::Ignored,
            }
        }

        if !self.focused {
            return EventResult::Ignored;
        }

        if self.read_only {
            // Keyboard scrolling only
            match event {
                InputEvent::CursorUp => self.scroll_up(1),
                InputEvent::CursorDown => self.scroll_down(1, inner_h),
                InputEvent::PageUp => self.scroll_up(inner_h.max(1)),
                InputEvent::PageDown => self.scroll_down(inner_h.max(1), inner_h),
                InputEvent::Home => self.top_line = 0,
                InputEvent::End => {
                    self.top_line = self.lines.len().saturating_sub(inner_h.max(1))
                }
                _ => return EventResult::Ignored,
            }
            return EventResult::Consumed;
        }

        match event {
            InputEvent::Char(c) => self.insert_char(*c),
            InputEvent::Enter => self.newline(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Delete => self.delete(),
            InputEvent::CursorUp => self.move_up(),
            InputEvent::CursorDown => self.move_down(),
            InputEvent::CursorLeft => self.move_left(),
            InputEvent::CursorRight => self.move_right(),
            InputEvent::Home => self.cursor_col = 0,
            InputEvent::End => self.cursor_col = self.line_len(self.cursor_line),
            InputEvent::PageUp => {
                self.cursor_line = self.cursor_line.saturating_sub(inner_h.max(1));
                self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
            }
            InputEvent::PageDown => {
                self.cursor_line =
                    (self.cursor_line + inner_h.max(1)).min(self.lines.len() - 1);
                self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
            }
            _ => return EventResult::Ignored,
        }

        self.ensure_cursor_visible(bounds);
        EventResult::Consumed
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }
}
