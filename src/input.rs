//! Input handling and key event processing

use crate::terminal::{Key, MouseButton, MouseEvent};

/// Processed input events for the dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse click
    MouseClick { row: u16, col: u16 },
    /// Mouse release
    MouseRelease { row: u16, col: u16 },
    /// Mouse drag (move while button held)
    MouseDrag { row: u16, col: u16 },
    /// Mouse wheel scroll
    ScrollUp { row: u16, col: u16 },
    ScrollDown { row: u16, col: u16 },
    /// Regular character input
    Char(char),
    /// Navigation keys
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Editing keys
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    /// Escape key
    Escape,
    /// F1 - help
    Help,
    /// Ctrl+V - paste from clipboard
    Paste,
    /// Other
    Unknown,
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => InputEvent::Char(c),
            Key::Enter => InputEvent::Enter,
            Key::Escape => InputEvent::Escape,
            Key::Backspace => InputEvent::Backspace,
            Key::Delete => InputEvent::Delete,
            Key::Tab => InputEvent::Tab,
            Key::ShiftTab => InputEvent::ShiftTab,
            Key::Up => InputEvent::CursorUp,
            Key::Down => InputEvent::CursorDown,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Home => InputEvent::Home,
            Key::End => InputEvent::End,
            Key::PageUp => InputEvent::PageUp,
            Key::PageDown => InputEvent::PageDown,
            Key::F(1) => InputEvent::Help,
            Key::Ctrl('v') => InputEvent::Paste,
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: true, motion: false }) => {
                InputEvent::MouseClick { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: false, .. }) => {
                InputEvent::MouseRelease { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, motion: true, .. }) => {
                InputEvent::MouseDrag { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelUp, row, col, .. }) => {
                InputEvent::ScrollUp { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelDown, row, col, .. }) => {
                InputEvent::ScrollDown { row, col }
            }
            Key::Mouse(_) => InputEvent::Unknown,
            _ => InputEvent::Unknown,
        }
    }
}

/// Extract mouse position from an event
pub fn mouse_position(event: &InputEvent) -> Option<(u16, u16)> {
    match event {
        InputEvent::MouseClick { row, col }
        | InputEvent::MouseRelease { row, col }
        | InputEvent::MouseDrag { row, col }
        | InputEvent::ScrollUp { row, col }
        | InputEvent::ScrollDown { row, col } => Some((*row, *col)),
        _ => None,
    }
}
