//! A modal crash report dialog for the terminal
//!
//! Presents a crash report in a DOS-style dialog: a message, an
//! expandable report body and an editable comments field. The user
//! either submits the report, which hands it to a pluggable
//! [`DeliveryRecipient`], or cancels. The dialog runs standalone via
//! [`CrashReporter::run_modal`] or attached to a [`HostWindow`] as a
//! sheet via [`CrashReporter::begin_sheet`].

pub mod delivery;
pub mod error;
pub mod format;
pub mod host;
pub mod input;
pub mod reporter;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use delivery::{DeliveryError, DeliveryRecipient, FileRecipient};
pub use error::{FormatError, ReporterError};
pub use format::{format_message, FormatArg};
pub use host::{HostWindow, SheetHandle};
pub use reporter::{CrashReporter, DismissalResult};
pub use ui::dialog::DisclosureState;
pub use ui::theme::Theme;
