//! Contact form sink.
//!
//! Submissions go through the [`ContactSink`] capability so the storage
//! medium stays injectable; the production sink appends JSON lines to a
//! local log file.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors recording a contact submission.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// Writing to the sink failed.
    #[error("failed to record submission: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the submission failed.
    #[error("failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A validated contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Capability for recording contact submissions.
pub trait ContactSink: Send + Sync {
    /// Record one submission.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError`] when the submission could not be stored.
    fn record(&self, submission: &ContactSubmission) -> Result<(), ContactError>;
}

/// Append-only JSONL sink, one submission per line.
#[derive(Debug)]
pub struct JsonlContactSink {
    path: PathBuf,
}

impl JsonlContactSink {
    /// Create a sink writing to `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContactSink for JsonlContactSink {
    fn record(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(submission)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonl_sink_appends_lines() {
        let dir = std::env::temp_dir().join(format!("verdant-contact-{}", uuid::Uuid::new_v4()));
        let path = dir.join("contact.jsonl");
        let sink = JsonlContactSink::new(path.clone());

        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Is the compost organic?".to_string(),
            submitted_at: Utc::now(),
        };
        sink.record(&submission).unwrap();
        sink.record(&submission).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: ContactSubmission = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back.email, "ada@example.com");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
