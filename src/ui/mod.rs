//! Dialog UI components

pub mod dialog;
pub mod layout;
pub mod theme;
pub mod widget;
pub mod widgets;

pub use dialog::{DialogAction, ReporterDialog};
pub use layout::Rect;
pub use theme::Theme;
