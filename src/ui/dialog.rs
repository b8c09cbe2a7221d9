//! The crash report dialog
//!
//! Hand-rolled layout: a centered window with the alert message, an
//! editable comments area, a collapsible report view and a button row.
//! The dialog is pure state plus event handling; the owning controller
//! drives the terminal loop and decides what to do with the actions.

use crate::input::{mouse_position, InputEvent};
use crate::screen::Screen;
use crate::ui::layout::{wrap_text, Rect};
use crate::ui::theme::Theme;
use crate::ui::widget::{EventResult, Widget};
use crate::ui::widgets::{Button, Label, TextArea};

const DIALOG_WIDTH: u16 = 64;
const COMMENTS_HEIGHT: u16 = 5;
const REPORT_HEIGHT: u16 = 9;

/// Whether the report details are shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisclosureState {
    Collapsed,
    Expanded,
}

/// High-level action produced by the dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogAction {
    Submit,
    Cancel,
    ToggleDetails,
    Help,
}

/// Focusable fields in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Comments,
    Report,
    Details,
    Submit,
    Cancel,
    Help,
}

/// Computed positions for one screen size
struct DialogLayout {
    window: Rect,
    message_rows: Vec<(u16, String)>,
    informative_rows: Vec<(u16, String)>,
    comments_label: (u16, u16),
    comments: Rect,
    report_label: Option<(u16, u16)>,
    report: Option<Rect>,
    details_btn: Rect,
    submit_btn: Rect,
    cancel_btn: Rect,
    help_btn: Option<Rect>,
}

pub struct ReporterDialog {
    title: String,
    message: String,
    informative: String,
    icon: String,
    shows_help: bool,
    disclosure: DisclosureState,
    comments: TextArea,
    comments_label: Label,
    report: TextArea,
    report_label: Label,
    details_btn: Button,
    submit_btn: Button,
    cancel_btn: Button,
    help_btn: Button,
    focus: usize,
}

impl ReporterDialog {
    pub fn new(
        message: &str,
        informative: &str,
        report: &str,
        icon: &str,
        shows_help: bool,
    ) -> Self {
        let mut dialog = Self {
            title: "Crash Reporter".to_string(),
            message: message.to_string(),
            informative: informative.to_string(),
            icon: icon.to_string(),
            shows_help,
            disclosure: DisclosureState::Collapsed,
            comments: TextArea::new(),
            comments_label: Label::new("Comments:"),
            report: TextArea::read_only(report),
            report_label: Label::new("Report:"),
            details_btn: Button::new("Show Details", "details"),
            submit_btn: Button::new("Submit Report", "submit"),
            cancel_btn: Button::new("Cancel", "cancel"),
            help_btn: Button::new("Help", "help"),
            focus: 0,
        };
        dialog.apply_focus();
        dialog
    }

    pub fn disclosure(&self) -> DisclosureState {
        self.disclosure
    }

    /// The user's comment text
    pub fn comments(&self) -> String {
        self.comments.text()
    }

    pub fn set_comments(&mut self, text: &str) {
        self.comments.set_text(text);
    }

    /// Insert clipboard text into the comments area if it has focus
    pub fn paste(&mut self, text: &str) {
        if self.fields()[self.focus] == Field::Comments {
            self.comments.insert_str(text);
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Comments];
        if self.disclosure == DisclosureState::Expanded {
            fields.push(Field::Report);
        }
        fields.push(Field::Details);
        fields.push(Field::Submit);
        fields.push(Field::Cancel);
        if self.shows_help {
            fields.push(Field::Help);
        }
        fields
    }

    fn apply_focus(&mut self) {
        let fields = self.fields();
        let focused = fields[self.focus.min(fields.len() - 1)];
        self.comments.set_focus(focused == Field::Comments);
        self.report.set_focus(focused == Field::Report);
        self.details_btn.set_focus(focused == Field::Details);
        self.submit_btn.set_focus(focused == Field::Submit);
        self.cancel_btn.set_focus(focused == Field::Cancel);
        self.help_btn.set_focus(focused == Field::Help);
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
        self.apply_focus();
    }

    fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
        self.apply_focus();
    }

    fn focus_field(&mut self, field: Field) {
        if let Some(idx) = self.fields().iter().position(|f| *f == field) {
            self.focus = idx;
            self.apply_focus();
        }
    }

    fn toggle_details(&mut self) {
        self.disclosure = match self.disclosure {
            DisclosureState::Collapsed => {
                self.details_btn.set_label("Hide Details");
                DisclosureState::Expanded
            }
            DisclosureState::Expanded => {
                self.details_btn.set_label("Show Details");
                DisclosureState::Collapsed
            }
        };
        // The focus list changed shape, keep the details button focused
        self.focus_field(Field::Details);
    }

    fn layout(&self, screen_width: u16, screen_height: u16) -> DialogLayout {
        let width = DIALOG_WIDTH.min(screen_width.saturating_sub(4)).max(20);
        let inner_w = width.saturating_sub(4) as usize;

        // First line of the message sits next to the icon
        let icon_w = self.icon.chars().count() + 1;
        let message_lines = wrap_text(&self.message, inner_w.saturating_sub(icon_w).max(1));
        let informative_lines = wrap_text(&self.informative, inner_w.max(1));

        let expanded = self.disclosure == DisclosureState::Expanded;
        let mut height = 2; // borders
        height += 1; // top padding
        height += message_lines.len() as u16;
        height += 1; // gap
        height += informative_lines.len() as u16;
        height += 1; // gap
        height += 1; // comments label
        height += COMMENTS_HEIGHT;
        if expanded {
            height += 1; // report label
            height += REPORT_HEIGHT;
        }
        height += 1; // gap
        height += 1; // button row
        height += 1; // bottom padding
        let height = height.min(screen_height.saturating_sub(2));

        let window = Rect::centered(screen_width, screen_height, width, height);
        let left = window.x + 2;
        let mut row = window.y + 2;

        let message_rows: Vec<(u16, String)> = message_lines
            .into_iter()
            .map(|line| {
                let r = (row, line);
                row += 1;
                r
            })
            .collect();
        row += 1;

        let informative_rows: Vec<(u16, String)> = informative_lines
            .into_iter()
            .map(|line| {
                let r = (row, line);
                row += 1;
                r
            })
            .collect();
        row += 1;

        let comments_label = (row, left);
        row += 1;
        let comments = Rect::new(left, row, width - 4, COMMENTS_HEIGHT);
        row += COMMENTS_HEIGHT;

        let (report_label, report) = if expanded {
            let label = (row, left);
            row += 1;
            let rect = Rect::new(left, row, width - 4, REPORT_HEIGHT);
            row += REPORT_HEIGHT;
            (Some(label), Some(rect))
        } else {
            (None, None)
        };
        row += 1;

        // Button row: help and details on the left, cancel and submit
        // on the right with submit rightmost
        let button_row = row;
        let mut left_col = left;
        let help_btn = if self.shows_help {
            let rect = Rect::new(left_col, button_row, self.help_btn.display_width(), 1);
            left_col += self.help_btn.display_width() + 2;
            Some(rect)
        } else {
            None
        };
        let details_btn = Rect::new(left_col, button_row, self.details_btn.display_width(), 1);

        let submit_w = self.submit_btn.display_width();
        let cancel_w = self.cancel_btn.display_width();
        let submit_x = (window.x + width).saturating_sub(2 + submit_w);
        let cancel_x = submit_x.saturating_sub(cancel_w + 2);
        let submit_btn = Rect::new(submit_x, button_row, submit_w, 1);
        let cancel_btn = Rect::new(cancel_x, button_row, cancel_w, 1);

        DialogLayout {
            window,
            message_rows,
            informative_rows,
            comments_label,
            comments,
            report_label,
            report,
            details_btn,
            submit_btn,
            cancel_btn,
            help_btn,
        }
    }

    pub fn draw(&self, screen: &mut Screen, theme: &Theme) {
        let (sw, sh) = screen.size();
        let layout = self.layout(sw, sh);
        let win = layout.window;

        screen.set_cursor_visible(false);

        if theme.dialog_shadow {
            screen.draw_shadow(win.y, win.x, win.width, win.height);
        }
        screen.draw_box(
            win.y,
            win.x,
            win.width,
            win.height,
            theme.dialog_border_fg,
            theme.dialog_border_bg,
        );

        // Title centered in the top border
        let title = format!(" {} ", self.title);
        let title_x = win.x + (win.width.saturating_sub(title.chars().count() as u16)) / 2;
        screen.write_str(win.y, title_x, &title, theme.dialog_title_fg, theme.dialog_title_bg);

        let left = win.x + 2;
        let icon_w = self.icon.chars().count() as u16 + 1;
        for (i, (row, line)) in layout.message_rows.iter().enumerate() {
            if i == 0 {
                screen.write_str(*row, left, &self.icon, theme.icon_fg, theme.icon_bg);
            }
            screen.write_str(*row, left + icon_w, line, theme.dialog_fg, theme.dialog_bg);
        }

        for (row, line) in &layout.informative_rows {
            screen.write_str(*row, left, line, theme.dialog_fg, theme.dialog_bg);
        }

        let (label_row, label_col) = layout.comments_label;
        let label_w = self.comments_label.text().chars().count() as u16;
        self.comments_label
            .draw(screen, Rect::new(label_col, label_row, label_w, 1), theme);
        self.comments.draw(screen, layout.comments, theme);

        if let (Some((row, col)), Some(rect)) = (layout.report_label, layout.report) {
            let label_w = self.report_label.text().chars().count() as u16;
            self.report_label
                .draw(screen, Rect::new(col, row, label_w, 1), theme);
            self.report.draw(screen, rect, theme);
        }

        if let Some(rect) = layout.help_btn {
            self.help_btn.draw(screen, rect, theme);
        }
        self.details_btn.draw(screen, layout.details_btn, theme);
        self.cancel_btn.draw(screen, layout.cancel_btn, theme);
        self.submit_btn.draw(screen, layout.submit_btn, theme);
    }

    fn map_action(&mut self, name: &str) -> Option<DialogAction> {
        match name {
            "submit" => Some(DialogAction::Submit),
            "cancel" => Some(DialogAction::Cancel),
            "help" => Some(DialogAction::Help),
            "details" => {
                self.toggle_details();
                Some(DialogAction::ToggleDetails)
            }
            _ => None,
        }
    }

    /// Handle one input event, returning an action the controller
    /// must act on
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        screen_size: (u16, u16),
    ) -> Option<DialogAction> {
        let layout = self.layout(screen_size.0, screen_size.1);

        match event {
            InputEvent::Escape => return Some(DialogAction::Cancel),
            InputEvent::Tab => {
                self.focus_next();
                return None;
            }
            InputEvent::ShiftTab => {
                self.focus_prev();
                return None;
            }
            InputEvent::Help if self.shows_help => return Some(DialogAction::Help),
            _ => {}
        }

        if let Some((row, col)) = mouse_position(event) {
            if matches!(event, InputEvent::MouseClick { .. })
                && !layout.window.contains(row, col)
            {
                return Some(DialogAction::Cancel);
            }

            if matches!(event, InputEvent::MouseClick { .. }) {
                if layout.comments.contains(row, col) {
                    self.focus_field(Field::Comments);
                } else if layout.report.is_some_and(|r| r.contains(row, col)) {
                    self.focus_field(Field::Report);
                }
            }

            let result = self.comments.handle_event(event, layout.comments);
            if result.is_consumed() {
                return None;
            }
            if let Some(rect) = layout.report {
                if self.report.handle_event(event, rect).is_consumed() {
                    return None;
                }
            }
            if let Some(rect) = layout.help_btn {
                if let EventResult::Action(name) = self.help_btn.handle_event(event, rect) {
                    return self.map_action(&name);
                }
            }
            if let EventResult::Action(name) =
                self.details_btn.handle_event(event, layout.details_btn)
            {
                return self.map_action(&name);
            }
            if let EventResult::Action(name) =
                self.submit_btn.handle_event(event, layout.submit_btn)
            {
                return self.map_action(&name);
            }
            if let EventResult::Action(name) =
                self.cancel_btn.handle_event(event, layout.cancel_btn)
            {
                return self.map_action(&name);
            }
            return None;
        }

        // Keyboard events go to the focused field
        let focused = self.fields()[self.focus.min(self.fields().len() - 1)];
        let result = match focused {
            Field::Comments => self.comments.handle_event(event, layout.comments),
            Field::Report => match layout.report {
                Some(rect) => self.report.handle_event(event, rect),
                None => EventResult::Ignored,
            },
            Field::Details => self.details_btn.handle_event(event, layout.details_btn),
            Field::Submit => self.submit_btn.handle_event(event, layout.submit_btn),
            Field::Cancel => self.cancel_btn.handle_event(event, layout.cancel_btn),
            Field::Help => match layout.help_btn {
                Some(rect) => self.help_btn.handle_event(event, rect),
                None => EventResult::Ignored,
            },
        };

        match result {
            EventResult::Action(name) => self.map_action(&name),
            EventResult::Consumed => None,
            // Return activates the default button from anywhere else
            EventResult::Ignored if *event == InputEvent::Enter => Some(DialogAction::Submit),
            EventResult::Ignored => None,
        }
    }
}
