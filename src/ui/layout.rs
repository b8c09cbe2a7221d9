//! Rectangle math for dialog layout

/// Represents a rectangular region (1-based screen coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.y && row < self.y + self.height && col >= self.x && col < self.x + self.width
    }

    /// Center a rect of the given size on a screen
    pub fn centered(screen_width: u16, screen_height: u16, width: u16, height: u16) -> Self {
        let width = width.min(screen_width);
        let height = height.min(screen_height);
        Self {
            x: (screen_width.saturating_sub(width)) / 2 + 1,
            y: (screen_height.saturating_sub(height)) / 2 + 1,
            width,
            height,
        }
    }
}

/// Wrap text to the given width, breaking on whitespace where possible
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }

            // Hard-break words longer than the line
            while current.chars().count() > width {
                let head: String = current.chars().take(width).collect();
                let tail: String = current.chars().skip(width).collect();
                lines.push(head);
                current = tail;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(5, 3, 10, 4);
        assert!(r.contains(3, 5));
        assert!(r.contains(6, 14));
        assert!(!r.contains(7, 5));
        assert!(!r.contains(3, 15));
    }

    #[test]
    fn test_centered_clamps_to_screen() {
        let r = Rect::centered(40, 10, 64, 20);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
        assert_eq!(r.x, 1);
        assert_eq!(r.y, 1);
    }

    #[test]
    fn test_wrap_text_breaks_on_spaces() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_text_hard_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_preserves_blank_lines() {
        let lines = wrap_text("one\n\ntwo", 10);
        assert_eq!(lines, vec!["one", "", "two"]);
    }
}
