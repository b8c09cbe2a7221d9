//! The crash report controller
//!
//! `CrashReporter` owns the report content and drives the dialog
//! through one of two presentation paths: `run_modal` takes over the
//! terminal and blocks until dismissal, `begin_sheet` attaches the
//! dialog to a `HostWindow` whose owner pumps events in. Both paths
//! produce exactly one `DismissalResult` and hand the report to the
//! delivery recipient on submit.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use crate::delivery::{DeliveryError, DeliveryRecipient, FileRecipient};
use crate::error::{FormatError, ReporterError};
use crate::format::{format_message, FormatArg};
use crate::host::{HostWindow, SheetHandle};
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Terminal;
use crate::ui::dialog::{DialogAction, DisclosureState, ReporterDialog};
use crate::ui::theme::Theme;

const DEFAULT_MESSAGE: &str = "The application quit unexpectedly.";
const DEFAULT_ICON: &str = "(!)";
const SHARED_REPORT_PATH: &str = "crash-reports.log";

/// How a presentation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissalResult {
    Submitted,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Modal,
    Sheet,
}

struct ActiveSheet {
    dialog: ReporterDialog,
    handle: std::sync::Arc<SheetHandle>,
}

pub struct CrashReporter {
    message_text: String,
    informative_text: String,
    report: String,
    comments: String,
    icon: String,
    help_anchor: Option<String>,
    shows_help: bool,
    theme: Theme,
    recipient: Box<dyn DeliveryRecipient>,
    phase: Phase,
    sheet: Option<ActiveSheet>,
    last_delivery_error: Option<DeliveryError>,
}

static SHARED: Lazy<Mutex<CrashReporter>> = Lazy::new(|| {
    Mutex::new(CrashReporter::new(
        Box::new(FileRecipient::new(SHARED_REPORT_PATH)),
        DEFAULT_MESSAGE,
        String::new(),
    ))
});

impl CrashReporter {
    fn new(
        recipient: Box<dyn DeliveryRecipient>,
        message_text: &str,
        informative_text: String,
    ) -> Self {
        Self {
            message_text: message_text.to_string(),
            informative_text,
            report: String::new(),
            comments: String::new(),
            icon: DEFAULT_ICON.to_string(),
            help_anchor: None,
            shows_help: false,
            theme: Theme::crash_dialog(),
            recipient,
            phase: Phase::Idle,
            sheet: None,
            last_delivery_error: None,
        }
    }

    /// Create a reporter with a formatted informative text
    ///
    /// The format string is expanded against `args` up front so a bad
    /// format fails here instead of at presentation time.
    pub fn with_recipient(
        recipient: Box<dyn DeliveryRecipient>,
        message_text: &str,
        format: &str,
        args: &[FormatArg],
    ) -> Result<Self, FormatError> {
        let informative_text = format_message(format, args)?;
        Ok(Self::new(recipient, message_text, informative_text))
    }

    /// The process-wide reporter, created on first use
    ///
    /// Delivers to a log file in the working directory. Callers that
    /// need a different recipient should construct their own instance.
    pub fn shared() -> &'static Mutex<CrashReporter> {
        &SHARED
    }

    fn ensure_idle(&self) -> Result<(), ReporterError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Modal | Phase::Sheet => Err(ReporterError::InvalidState),
        }
    }

    pub fn is_presenting(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn message_text(&self) -> &str {
        &self.message_text
    }

    pub fn informative_text(&self) -> &str {
        &self.informative_text
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn help_anchor(&self) -> Option<&str> {
        self.help_anchor.as_deref()
    }

    pub fn shows_help(&self) -> bool {
        self.shows_help
    }

    /// Disclosure state of the attached sheet, `Collapsed` otherwise
    ///
    /// The modal path keeps its dialog internal to the blocking run,
    /// so there is no caller to observe it mid-presentation; each
    /// presentation starts collapsed regardless.
    pub fn disclosure(&self) -> DisclosureState {
        match &self.sheet {
            Some(sheet) => sheet.dialog.disclosure(),
            None => DisclosureState::Collapsed,
        }
    }

    pub fn set_message_text(&mut self, text: impl Into<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.message_text = text.into();
        Ok(())
    }

    pub fn set_informative_text(&mut self, text: impl Into<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.informative_text = text.into();
        Ok(())
    }

    pub fn set_report(&mut self, report: impl Into<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.report = report.into();
        Ok(())
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.comments = comments.into();
        Ok(())
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.icon = icon.into();
        Ok(())
    }

    pub fn set_help_anchor(&mut self, anchor: Option<String>) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.help_anchor = anchor;
        Ok(())
    }

    pub fn set_shows_help(&mut self, shows_help: bool) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.shows_help = shows_help;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.theme = theme;
        Ok(())
    }

    /// Swap the delivery recipient between presentations
    pub fn set_recipient(
        &mut self,
        recipient: Box<dyn DeliveryRecipient>,
    ) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        self.recipient = recipient;
        Ok(())
    }

    /// Error from the most recent failed delivery, if any
    ///
    /// A failed delivery does not change the dismissal result and is
    /// not retried; this is the only place the failure surfaces.
    pub fn take_delivery_error(&mut self) -> Option<DeliveryError> {
        self.last_delivery_error.take()
    }

    fn make_dialog(&self) -> ReporterDialog {
        let mut dialog = ReporterDialog::new(
            &self.message_text,
            &self.informative_text,
            &self.report,
            &self.icon,
            self.shows_help,
        );
        if !self.comments.is_empty() {
            dialog.set_comments(&self.comments);
        }
        dialog
    }

    fn deliver(&mut self) {
        info!("handing report to delivery recipient");
        match self.recipient.deliver(&self.comments, &self.report) {
            Ok(()) => {
                self.last_delivery_error = None;
            }
            Err(err) => {
                warn!(error = %err, "report delivery failed");
                self.last_delivery_error = Some(err);
            }
        }
    }

    fn show_help(&self) {
        if let Some(anchor) = &self.help_anchor {
            info!(anchor = %anchor, "help requested");
        }
    }

    /// Present the dialog modally, blocking until dismissal
    ///
    /// The terminal is restored on every exit path, including errors,
    /// and the controller returns to idle.
    pub fn run_modal(&mut self) -> Result<DismissalResult, ReporterError> {
        self.ensure_idle()?;
        self.phase = Phase::Modal;
        info!(message = %self.message_text, "presenting crash report");

        let result = self.modal_loop();
        self.phase = Phase::Idle;
        if let Ok(result) = &result {
            debug!(?result, "crash report dismissed");
        }
        result
    }

    /// Present modally only when there is a report to show
    pub fn run_modal_if_needed(&mut self) -> Result<Option<DismissalResult>, ReporterError> {
        if self.report.trim().is_empty() {
            debug!("no report content, nothing to present");
            return Ok(None);
        }
        self.run_modal().map(Some)
    }

    fn modal_loop(&mut self) -> Result<DismissalResult, ReporterError> {
        let mut dialog = self.make_dialog();
        let mut terminal = Terminal::new()?;
        let (width, height) = terminal.size();
        let mut screen = Screen::new(width, height);
        let mut clipboard = arboard::Clipboard::new().ok();

        loop {
            terminal.update_size();
            if terminal.size() != screen.size() {
                let (width, height) = terminal.size();
                screen.resize(width, height);
            }

            screen.clear_with(self.theme.backdrop_fg, self.theme.backdrop_bg);
            dialog.draw(&mut screen, &self.theme);
            screen.flush(&mut terminal)?;

            let key = match terminal.read_key()? {
                Some(key) => key,
                None => continue,
            };
            let event = InputEvent::from(key);

            if event == InputEvent::Paste {
                if let Some(clipboard) = clipboard.as_mut() {
                    if let Ok(text) = clipboard.get_text() {
                        dialog.paste(&text);
                    }
                }
                continue;
            }

            match dialog.handle_event(&event, screen.size()) {
                Some(DialogAction::Submit) => {
                    self.comments = dialog.comments();
                    self.deliver();
                    return Ok(DismissalResult::Submitted);
                }
                Some(DialogAction::Cancel) => {
                    self.comments = dialog.comments();
                    return Ok(DismissalResult::Cancelled);
                }
                Some(DialogAction::ToggleDetails) => {
                    debug!(state = ?dialog.disclosure(), "details toggled");
                }
                Some(DialogAction::Help) => self.show_help(),
                None => {}
            }
        }
    }

    /// Attach the dialog to a host window and return immediately
    ///
    /// The host owner forwards input with [`sheet_event`] and renders
    /// with [`draw_sheet`]. `completion` runs exactly once: on
    /// dismissal, or with `Cancelled` if the host is dropped first.
    ///
    /// [`sheet_event`]: Self::sheet_event
    /// [`draw_sheet`]: Self::draw_sheet
    pub fn begin_sheet(
        &mut self,
        host: &HostWindow,
        completion: impl FnOnce(DismissalResult) + Send + 'static,
    ) -> Result<(), ReporterError> {
        self.ensure_idle()?;
        let handle = host.attach_sheet(Box::new(completion));
        self.sheet = Some(ActiveSheet {
            dialog: self.make_dialog(),
            handle,
        });
        self.phase = Phase::Sheet;
        info!(host = %host.title(), "crash report sheet attached");
        Ok(())
    }

    /// Forward one input event to the attached sheet
    ///
    /// Returns the dismissal result once the sheet finishes. If the
    /// host was torn down since the last event the sheet unwinds as
    /// cancelled; the host already ran the completion in that case.
    pub fn sheet_event(
        &mut self,
        event: &InputEvent,
        screen_size: (u16, u16),
    ) -> Option<DismissalResult> {
        if self.sheet.as_ref().is_some_and(|s| s.handle.is_finished()) {
            debug!("sheet host went away, unwinding");
            self.sheet = None;
            self.phase = Phase::Idle;
            return Some(DismissalResult::Cancelled);
        }

        let action = self.sheet.as_mut()?.dialog.handle_event(event, screen_size)?;
        match action {
            DialogAction::Submit => self.finish_sheet(DismissalResult::Submitted),
            DialogAction::Cancel => self.finish_sheet(DismissalResult::Cancelled),
            DialogAction::ToggleDetails => None,
            DialogAction::Help => {
                self.show_help();
                None
            }
        }
    }

    /// Draw the attached sheet; a no-op when no sheet is active
    pub fn draw_sheet(&self, screen: &mut Screen) {
        if let Some(sheet) = &self.sheet {
            sheet.dialog.draw(screen, &self.theme);
        }
    }

    fn finish_sheet(&mut self, result: DismissalResult) -> Option<DismissalResult> {
        let sheet = self.sheet.take()?;
        self.comments = sheet.dialog.comments();
        if result == DismissalResult::Submitted {
            self.deliver();
        }
        sheet.handle.finish(result);
        self.phase = Phase::Idle;
        debug!(?result, "crash report sheet dismissed");
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SCREEN: (u16, u16) = (80, 25);

    struct RecordingRecipient {
        deliveries: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl DeliveryRecipient for RecordingRecipient {
        fn deliver(&mut self, comments: &str, report: &str) -> Result<(), DeliveryError> {
            self.deliveries
                .lock()
                .unwrap()
                .push((comments.to_string(), report.to_string()));
            Ok(())
        }
    }

    struct FailingRecipient;

    impl DeliveryRecipient for FailingRecipient {
        fn deliver(&mut self, _: &str, _: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError::new("collection endpoint unreachable"))
        }
    }

    fn reporter_with(recipient: Box<dyn DeliveryRecipient>) -> CrashReporter {
        let mut reporter = CrashReporter::with_recipient(
            recipient,
            "The application quit unexpectedly",
            "Version %s crashed with signal %d",
            &["1.4.2".into(), 11.into()],
        )
        .unwrap();
        reporter.set_report("Thread 0 crashed:\n0 app main + 24").unwrap();
        reporter
    }

    /// Tab twice from the comments field lands on the submit button
    fn submit_via_events(reporter: &mut CrashReporter) -> Option<DismissalResult> {
        reporter.sheet_event(&InputEvent::Tab, SCREEN);
        reporter.sheet_event(&InputEvent::Tab, SCREEN);
        reporter.sheet_event(&InputEvent::Enter, SCREEN)
    }

    #[test]
    fn test_formatted_informative_text() {
        let reporter = reporter_with(Box::new(FailingRecipient));
        assert_eq!(
            reporter.informative_text(),
            "Version 1.4.2 crashed with signal 11"
        );
    }

    #[test]
    fn test_bad_format_fails_construction() {
        let err = CrashReporter::with_recipient(
            Box::new(FailingRecipient),
            "m",
            "%d",
            &["not a number".into()],
        )
        .err()
        .unwrap();
        assert!(matches!(err, FormatError::TypeMismatch { .. }));
    }

    #[test]
    fn test_second_presentation_rejected_while_sheet_active() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let host = HostWindow::new("main");
        reporter.begin_sheet(&host, |_| {}).unwrap();

        assert!(matches!(
            reporter.begin_sheet(&host, |_| {}),
            Err(ReporterError::InvalidState)
        ));
        assert!(matches!(
            reporter.run_modal(),
            Err(ReporterError::InvalidState)
        ));
    }

    #[test]
    fn test_mutation_rejected_while_presenting() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let host = HostWindow::new("main");
        reporter.begin_sheet(&host, |_| {}).unwrap();

        assert!(matches!(
            reporter.set_report("new"),
            Err(ReporterError::InvalidState)
        ));
        assert!(matches!(
            reporter.set_message_text("new"),
            Err(ReporterError::InvalidState)
        ));
        assert_eq!(reporter.report(), "Thread 0 crashed:\n0 app main + 24");
    }

    #[test]
    fn test_sheet_submit_delivers_with_comments() {
        let deliveries = Arc::new(Mutex::new(Vec::new()));
        let mut reporter = reporter_with(Box::new(RecordingRecipient {
            deliveries: Arc::clone(&deliveries),
        }));
        let completions = Arc::new(AtomicUsize::new(0));
        let host = HostWindow::new("main");
        {
            let completions = Arc::clone(&completions);
            reporter
                .begin_sheet(&host, move |result| {
                    assert_eq!(result, DismissalResult::Submitted);
                    completions.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        for c in "it froze".chars() {
            reporter.sheet_event(&InputEvent::Char(c), SCREEN);
        }
        let result = submit_via_events(&mut reporter);

        assert_eq!(result, Some(DismissalResult::Submitted));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        let deliveries = deliveries.lock().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, "it froze");
        assert!(deliveries[0].1.contains("Thread 0 crashed"));
        assert!(!reporter.is_presenting());
    }

    #[test]
    fn test_sheet_cancel_never_delivers() {
        let deliveries = Arc::new(Mutex::new(Vec::new()));
        let mut reporter = reporter_with(Box::new(RecordingRecipient {
            deliveries: Arc::clone(&deliveries),
        }));
        let host = HostWindow::new("main");
        reporter
            .begin_sheet(&host, |result| {
                assert_eq!(result, DismissalResult::Cancelled);
            })
            .unwrap();

        let result = reporter.sheet_event(&InputEvent::Escape, SCREEN);
        assert_eq!(result, Some(DismissalResult::Cancelled));
        assert!(deliveries.lock().unwrap().is_empty());
        assert!(!reporter.is_presenting());
    }

    #[test]
    fn test_host_drop_unwinds_sheet_as_cancelled() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let completions = Arc::new(AtomicUsize::new(0));
        let host = HostWindow::new("main");
        {
            let completions = Arc::clone(&completions);
            reporter
                .begin_sheet(&host, move |result| {
                    assert_eq!(result, DismissalResult::Cancelled);
                    completions.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        drop(host);
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        // The next pumped event unwinds without re-running the completion
        let result = reporter.sheet_event(&InputEvent::Char('x'), SCREEN);
        assert_eq!(result, Some(DismissalResult::Cancelled));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert!(!reporter.is_presenting());
    }

    #[test]
    fn test_delivery_failure_still_submits_and_is_surfaced() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let host = HostWindow::new("main");
        reporter.begin_sheet(&host, |_| {}).unwrap();

        let result = submit_via_events(&mut reporter);
        assert_eq!(result, Some(DismissalResult::Submitted));

        let err = reporter.take_delivery_error().unwrap();
        assert!(err.to_string().contains("unreachable"));
        assert!(reporter.take_delivery_error().is_none());

        // Controller is reusable after a failed delivery
        reporter.begin_sheet(&host, |_| {}).unwrap();
        assert!(reporter.is_presenting());
    }

    #[test]
    fn test_disclosure_round_trip_via_events() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let host = HostWindow::new("main");
        reporter.begin_sheet(&host, |_| {}).unwrap();
        assert_eq!(reporter.disclosure(), DisclosureState::Collapsed);

        // Tab to the details button and toggle twice
        reporter.sheet_event(&InputEvent::Tab, SCREEN);
        reporter.sheet_event(&InputEvent::Enter, SCREEN);
        assert_eq!(reporter.disclosure(), DisclosureState::Expanded);
        reporter.sheet_event(&InputEvent::Enter, SCREEN);
        assert_eq!(reporter.disclosure(), DisclosureState::Collapsed);
    }

    #[test]
    fn test_run_modal_if_needed_skips_empty_report() {
        let mut reporter = CrashReporter::with_recipient(
            Box::new(FailingRecipient),
            "m",
            "no crash",
            &[],
        )
        .unwrap();
        let result = reporter.run_modal_if_needed().unwrap();
        assert_eq!(result, None);
        assert!(!reporter.is_presenting());
    }

    #[test]
    fn test_shared_is_one_instance_across_threads() {
        let first = CrashReporter::shared() as *const _;
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let shared = CrashReporter::shared();
                    let guard = shared.lock().unwrap();
                    (shared as *const _ as usize, guard.message_text().to_string())
                })
            })
            .collect();
        for handle in handles {
            let (addr, message) = handle.join().unwrap();
            assert_eq!(addr, first as usize);
            assert_eq!(message, DEFAULT_MESSAGE);
        }
    }

    #[test]
    fn test_comments_survive_dismissal() {
        let mut reporter = reporter_with(Box::new(FailingRecipient));
        let host = HostWindow::new("main");
        reporter.begin_sheet(&host, |_| {}).unwrap();
        for c in "kept".chars() {
            reporter.sheet_event(&InputEvent::Char(c), SCREEN);
        }
        reporter.sheet_event(&InputEvent::Escape, SCREEN);
        assert_eq!(reporter.comments(), "kept");
    }
}
