//! Centralized theme/styling for the dialog widgets

use crate::terminal::Color;

/// Colors used by the dialog and its widgets
#[derive(Clone, Debug)]
pub struct Theme {
    // Dialog/window colors
    pub dialog_fg: Color,
    pub dialog_bg: Color,
    pub dialog_border_fg: Color,
    pub dialog_border_bg: Color,
    pub dialog_title_fg: Color,
    pub dialog_title_bg: Color,
    pub dialog_shadow: bool,

    // Backdrop behind the dialog (standalone modal runs)
    pub backdrop_fg: Color,
    pub backdrop_bg: Color,

    // Icon colors
    pub icon_fg: Color,
    pub icon_bg: Color,

    // Button colors
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_focused_fg: Color,
    pub button_focused_bg: Color,

    // Label colors
    pub label_fg: Color,
    pub label_bg: Color,

    // Text area colors
    pub text_area_fg: Color,
    pub text_area_bg: Color,
    pub text_area_focused_fg: Color,
    pub text_area_focused_bg: Color,
}

impl Theme {
    /// Classic gray dialog theme
    pub fn crash_dialog() -> Self {
        Self {
            dialog_fg: Color::Black,
            dialog_bg: Color::LightGray,
            dialog_border_fg: Color::Black,
            dialog_border_bg: Color::LightGray,
            dialog_title_fg: Color::Black,
            dialog_title_bg: Color::LightGray,
            dialog_shadow: true,

            backdrop_fg: Color::LightGray,
            backdrop_bg: Color::Blue,

            icon_fg: Color::LightRed,
            icon_bg: Color::LightGray,

            button_fg: Color::Black,
            button_bg: Color::LightGray,
            button_focused_fg: Color::White,
            button_focused_bg: Color::Black,

            label_fg: Color::Black,
            label_bg: Color::LightGray,

            text_area_fg: Color::Black,
            text_area_bg: Color::White,
            text_area_focused_fg: Color::Black,
            text_area_focused_bg: Color::Cyan,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::crash_dialog()
    }
}
