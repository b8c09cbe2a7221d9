//! Button widget - a clickable button

use crate::input::{mouse_position, InputEvent};
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::widget::{EventResult, Widget};

/// A clickable button widget, drawn QBasic style as `< Label >`
pub struct Button {
    label: String,
    focused: bool,
    action_name: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focused: false,
            action_name: action_name.into(),
        }
    }

    /// Get the label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the label
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Display width including brackets
    pub fn display_width(&self) -> u16 {
        self.label.chars().count() as u16 + 4
    }
}

impl Widget for Button {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let (fg, bg) = if self.focused {
            (theme.button_focused_fg, theme.button_focused_bg)
        } else {
            (theme.button_fg, theme.button_bg)
        };

        let text = format!("< {} >", self.label);
        let display: String = text.chars().take(bounds.width as usize).collect();
        screen.write_str(bounds.y, bounds.x, &display, fg, bg);
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        if self.focused {
            match event {
                InputEvent::Enter | InputEvent::Char(' ') => {
                    return EventResult::Action(self.action_name.clone());
                }
                _ => {}
            }
        }

        let (row, col) = match mouse_position(event) {
            Some(pos) => pos,
            None => return EventResult::Ignored,
        };

        if !bounds.contains(row, col) {
            return EventResult::Ignored;
        }

        if matches!(event, InputEvent::MouseClick { .. }) {
            return EventResult::Action(self.action_name.clone());
        }

        EventResult::Ignored
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_activates_focused_button() {
        let mut btn = Button::new("Submit", "submit");
        btn.set_focus(true);
        let result = btn.handle_event(&InputEvent::Enter, Rect::new(1, 1, 12, 1));
        assert_eq!(result, EventResult::Action("submit".to_string()));
    }

    #[test]
    fn test_enter_ignored_when_unfocused() {
        let mut btn = Button::new("Submit", "submit");
        let result = btn.handle_event(&InputEvent::Enter, Rect::new(1, 1, 12, 1));
        assert_eq!(result, EventResult::Ignored);
    }

    #[test]
    fn test_click_inside_bounds_activates() {
        let mut btn = Button::new("Cancel", "cancel");
        let bounds = Rect::new(10, 5, 10, 1);
        let result = btn.handle_event(&InputEvent::MouseClick { row: 5, col: 12 }, bounds);
        assert_eq!(result, EventResult::Action("cancel".to_string()));

        let result = btn.handle_event(&InputEvent::MouseClick { row: 6, col: 12 }, bounds);
        assert_eq!(result, EventResult::Ignored);
    }
}
