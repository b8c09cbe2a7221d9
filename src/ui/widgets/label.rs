//! Label widget - static text display

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::widget::{EventResult, Widget};

/// A static text label widget
#[derive(Clone, Debug)]
pub struct Label {
    text: String,
}

impl Label {
    /// Create a new label with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the label text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        let display: String = self.text.chars().take(bounds.width as usize).collect();
        screen.write_str(bounds.y, bounds.x, &display, theme.label_fg, theme.label_bg);
    }

    fn handle_event(&mut self, _event: &InputEvent, _bounds: Rect) -> EventResult {
        // Labels don't handle events
        EventResult::Ignored
    }
}
