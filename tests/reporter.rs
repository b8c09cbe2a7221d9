//! End-to-end exercise of the reporter through the event-driven core
//!
//! Drives a sheet presentation the way a host application would: feed
//! input events, watch the dismissal result, and check what reached
//! the delivery recipient.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crash_reporter::input::InputEvent;
use crash_reporter::{
    CrashReporter, DismissalResult, DisclosureState, FileRecipient, HostWindow,
};

const SCREEN: (u16, u16) = (80, 30);

const REPORT: &str = "\
Exception: EXC_BAD_ACCESS (SIGSEGV)

Thread 0 Crashed:
0   app   0x100003f2c  frobnicate + 44
1   app   0x100003e80  main + 128";

fn type_text(reporter: &mut CrashReporter, text: &str) {
    for c in text.chars() {
        reporter.sheet_event(&InputEvent::Char(c), SCREEN);
    }
}

#[test]
fn full_report_cycle_through_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("reports.log");

    let mut reporter = CrashReporter::with_recipient(
        Box::new(FileRecipient::new(&log)),
        "The application quit unexpectedly",
        "%s %s crashed. Add any details and press Submit Report.",
        &["demo".into(), "1.4.2".into()],
    )
    .unwrap();
    reporter.set_report(REPORT).unwrap();

    assert_eq!(
        reporter.informative_text(),
        "demo 1.4.2 crashed. Add any details and press Submit Report."
    );

    let completions = Arc::new(Mutex::new(Vec::new()));
    let host = HostWindow::new("editor");
    {
        let completions = Arc::clone(&completions);
        reporter
            .begin_sheet(&host, move |result| {
                completions.lock().unwrap().push(result);
            })
            .unwrap();
    }
    assert!(reporter.is_presenting());
    assert_eq!(host.active_sheets(), 1);

    // Comments field has initial focus
    type_text(&mut reporter, "started after the last update");
    reporter.sheet_event(&InputEvent::Enter, SCREEN);
    type_text(&mut reporter, "happens every time");

    // Tab to the details button and expand the report view
    reporter.sheet_event(&InputEvent::Tab, SCREEN);
    assert_eq!(
        reporter.sheet_event(&InputEvent::Enter, SCREEN),
        None,
        "toggling details must not dismiss the sheet"
    );
    assert_eq!(reporter.disclosure(), DisclosureState::Expanded);

    // Scroll the read-only report view, then move on to submit
    reporter.sheet_event(&InputEvent::ShiftTab, SCREEN);
    reporter.sheet_event(&InputEvent::CursorDown, SCREEN);
    reporter.sheet_event(&InputEvent::Tab, SCREEN);
    reporter.sheet_event(&InputEvent::Tab, SCREEN);
    let result = reporter.sheet_event(&InputEvent::Enter, SCREEN);

    assert_eq!(result, Some(DismissalResult::Submitted));
    assert_eq!(
        *completions.lock().unwrap(),
        vec![DismissalResult::Submitted]
    );
    assert!(!reporter.is_presenting());
    assert_eq!(host.active_sheets(), 0);
    assert!(reporter.take_delivery_error().is_none());
    assert_eq!(
        reporter.comments(),
        "started after the last update\nhappens every time"
    );

    let delivered = fs::read_to_string(&log).unwrap();
    assert!(delivered.contains("started after the last update"));
    assert!(delivered.contains("frobnicate + 44"));

    // The controller is immediately reusable; cancelling the second
    // presentation delivers nothing new
    let cancels = Arc::new(AtomicUsize::new(0));
    {
        let cancels = Arc::clone(&cancels);
        reporter
            .begin_sheet(&host, move |result| {
                assert_eq!(result, DismissalResult::Cancelled);
                cancels.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
    }
    let result = reporter.sheet_event(&InputEvent::Escape, SCREEN);
    assert_eq!(result, Some(DismissalResult::Cancelled));
    assert_eq!(cancels.load(Ordering::SeqCst), 1);

    let after_cancel = fs::read_to_string(&log).unwrap();
    assert_eq!(delivered, after_cancel);
}

#[test]
fn click_outside_the_dialog_cancels() {
    let mut reporter = CrashReporter::with_recipient(
        Box::new(FileRecipient::new("/dev/null")),
        "m",
        "i",
        &[],
    )
    .unwrap();
    reporter.set_report(REPORT).unwrap();

    let host = HostWindow::new("editor");
    reporter.begin_sheet(&host, |_| {}).unwrap();

    let result = reporter.sheet_event(&InputEvent::MouseClick { row: 1, col: 1 }, SCREEN);
    assert_eq!(result, Some(DismissalResult::Cancelled));
}

#[test]
fn host_teardown_cancels_attached_sheet_once() {
    let mut reporter = CrashReporter::with_recipient(
        Box::new(FileRecipient::new("/dev/null")),
        "m",
        "i",
        &[],
    )
    .unwrap();
    reporter.set_report(REPORT).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let host = HostWindow::new("editor");
    {
        let calls = Arc::clone(&calls);
        reporter
            .begin_sheet(&host, move |result| {
                assert_eq!(result, DismissalResult::Cancelled);
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
    }

    drop(host);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Pumping more events unwinds the sheet but never re-runs the
    // completion
    reporter.sheet_event(&InputEvent::Char('x'), SCREEN);
    reporter.sheet_event(&InputEvent::Escape, SCREEN);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!reporter.is_presenting());
}
