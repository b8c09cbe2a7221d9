//! Host window attachment for sheet presentation
//!
//! A sheet is a dialog attached to a host window instead of running
//! its own modal loop. The host hands out a [`SheetHandle`] whose
//! completion closure runs exactly once, either when the sheet is
//! dismissed or when the host goes away first.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::reporter::DismissalResult;

type Completion = Box<dyn FnOnce(DismissalResult) + Send>;

/// One-shot completion for an attached sheet
pub struct SheetHandle {
    completion: Mutex<Option<Completion>>,
}

impl SheetHandle {
    fn new(completion: Completion) -> Arc<Self> {
        Arc::new(Self {
            completion: Mutex::new(Some(completion)),
        })
    }

    /// Run the completion with the given result
    ///
    /// Returns true if the completion ran, false if the sheet had
    /// already finished. Poisoned locks are treated as finished.
    pub fn finish(&self, result: DismissalResult) -> bool {
        let completion = match self.completion.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match completion {
            Some(completion) => {
                completion(result);
                true
            }
            None => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self.completion.lock() {
            Ok(slot) => slot.is_none(),
            Err(_) => true,
        }
    }
}

/// A window a sheet can attach to
///
/// Dropping the host cancels every sheet still attached to it.
pub struct HostWindow {
    title: String,
    sheets: Mutex<Vec<Arc<SheetHandle>>>,
}

impl HostWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sheets: Mutex::new(Vec::new()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Attach a sheet and get its completion handle
    pub fn attach_sheet(&self, completion: Completion) -> Arc<SheetHandle> {
        let handle = SheetHandle::new(completion);
        if let Ok(mut sheets) = self.sheets.lock() {
            sheets.retain(|s| !s.is_finished());
            sheets.push(Arc::clone(&handle));
        }
        debug!(host = %self.title, "sheet attached");
        handle
    }

    /// Number of sheets still awaiting dismissal
    pub fn active_sheets(&self) -> usize {
        match self.sheets.lock() {
            Ok(sheets) => sheets.iter().filter(|s| !s.is_finished()).count(),
            Err(_) => 0,
        }
    }
}

impl Drop for HostWindow {
    fn drop(&mut self) {
        let sheets = match self.sheets.lock() {
            Ok(mut sheets) => std::mem::take(&mut *sheets),
            Err(_) => return,
        };
        for sheet in sheets {
            if sheet.finish(DismissalResult::Cancelled) {
                debug!(host = %self.title, "pending sheet cancelled by host teardown");
            }
        }
    }
}
