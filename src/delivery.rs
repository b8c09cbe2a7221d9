//! Report delivery
//!
//! Submission hands the report and the user's comments to a
//! [`DeliveryRecipient`]. The reporter itself has no opinion on the
//! transport; implementations may write a file, post to a collection
//! endpoint or queue the report for later.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

/// Failure reported by a delivery recipient
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DeliveryError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Receives a submitted report
///
/// `deliver` is called at most once per presentation, after the user
/// confirms submission and before the dialog is torn down. A failed
/// delivery is not retried.
pub trait DeliveryRecipient: Send {
    fn deliver(&mut self, comments: &str, report: &str) -> Result<(), DeliveryError>;
}

impl<F> DeliveryRecipient for F
where
    F: FnMut(&str, &str) -> Result<(), DeliveryError> + Send,
{
    fn deliver(&mut self, comments: &str, report: &str) -> Result<(), DeliveryError> {
        self(comments, report)
    }
}

/// Writes submitted reports to a file, one per submission
pub struct FileRecipient {
    path: PathBuf,
}

impl FileRecipient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeliveryRecipient for FileRecipient {
    fn deliver(&mut self, comments: &str, report: &str) -> Result<(), DeliveryError> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DeliveryError::with_source(format!("cannot open {}", self.path.display()), e)
            })?;

        writeln!(file, "--- report ---")
            .and_then(|_| writeln!(file, "{report}"))
            .and_then(|_| writeln!(file, "--- comments ---"))
            .and_then(|_| writeln!(file, "{comments}"))
            .map_err(|e| {
                DeliveryError::with_source(format!("cannot write {}", self.path.display()), e)
            })?;

        info!(path = %self.path.display(), "report delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_recipient_appends_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.log");
        let mut recipient = FileRecipient::new(&path);

        recipient.deliver("it froze", "stack trace").unwrap();
        recipient.deliver("", "second trace").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("--- report ---\nstack trace"));
        assert!(contents.contains("--- comments ---\nit froze"));
        assert!(contents.contains("second trace"));
    }

    #[test]
    fn test_file_recipient_reports_open_failure() {
        let mut recipient = FileRecipient::new("/nonexistent-dir/reports.log");
        let err = recipient.deliver("", "trace").unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }

    #[test]
    fn test_closure_recipient() {
        let mut seen = Vec::new();
        {
            let mut recipient = |comments: &str, report: &str| -> Result<(), DeliveryError> {
                seen.push((comments.to_string(), report.to_string()));
                Ok(())
            };
            recipient.deliver("c", "r").unwrap();
        }
        assert_eq!(seen, vec![("c".to_string(), "r".to_string())]);
    }
}
