//! Widget trait and event results

use crate::input::InputEvent;
use crate::screen::Screen;
use super::layout::Rect;
use super::theme::Theme;

/// Result of handling an event
#[derive(Clone, Debug, PartialEq)]
pub enum EventResult {
    /// Event was handled, stop propagation
    Consumed,
    /// Event was not handled, continue propagation
    Ignored,
    /// Event triggered a named action
    Action(String),
}

impl EventResult {
    /// Check if the event was consumed (either Consumed or Action)
    pub fn is_consumed(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Common interface for dialog widgets
///
/// Widgets receive their bounds from the dialog layout and draw
/// themselves within those bounds using the theme colors.
pub trait Widget {
    /// Draw the widget to the screen within the given bounds
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme);

    /// Handle an input event
    ///
    /// Mouse events should check if the position is within bounds
    /// before handling.
    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult;

    /// Whether this widget can receive keyboard focus
    fn focusable(&self) -> bool {
        false
    }

    /// Set focus state
    fn set_focus(&mut self, _focused: bool) {}
}
