//! Outbound notifications (best effort).

use crate::errors::AppResult;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub trait NotificationService {
    fn notify(&self, recipients: &[String], subject: &str, body: &str) -> AppResult<()>;
}

/// Appends every message to an outbox file, to be picked up by a mailer.
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NotificationService for OutboxNotifier {
    fn notify(&self, recipients: &[String], subject: &str, body: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "To: {}", recipients.join(","))?;
        writeln!(file, "Date: {}", chrono::Local::now().to_rfc3339())?;
        writeln!(file, "Subject: {subject}")?;
        writeln!(file)?;
        writeln!(file, "{body}")?;
        writeln!(file, "----")?;
        Ok(())
    }
}

/// Only records the notification in the log.
pub struct LogNotifier;

impl NotificationService for LogNotifier {
    fn notify(&self, recipients: &[String], subject: &str, _body: &str) -> AppResult<()> {
        tracing::info!(to = %recipients.join(","), subject, "notification");
        Ok(())
    }
}
