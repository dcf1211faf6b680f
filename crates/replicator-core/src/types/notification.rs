//! Notification messages sent to the topic and chat channels

use serde::{Deserialize, Serialize};

pub const SUBJECT_SUCCESS: &str = "S3 Replication Success";
pub const SUBJECT_COMPLETED: &str = "S3 Replication Completed";
pub const SUBJECT_FAILED: &str = "S3 Replication Failed";

/// A message for the notification channels. The subject only applies to
/// the topic; the chat webhook receives the body alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn replication_succeeded(key: &str) -> Self {
        Self::new(
            SUBJECT_SUCCESS,
            format!("Object '{}' replicated successfully.", key),
        )
    }

    pub fn replication_completed() -> Self {
        Self::new(
            SUBJECT_COMPLETED,
            "The replication process has completed successfully.",
        )
    }

    pub fn replication_failed(key: &str, reason: &str) -> Self {
        Self::new(
            SUBJECT_FAILED,
            format!("Failed to replicate object '{}': {}", key, reason),
        )
    }

    pub fn failure(body: impl Into<String>) -> Self {
        Self::new(SUBJECT_FAILED, body)
    }

    pub fn unexpected_error(error: &dyn std::fmt::Display) -> Self {
        Self::failure(format!("Unexpected error: {}", error))
    }

    pub fn is_failure(&self) -> bool {
        self.subject == SUBJECT_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_texts() {
        let success = NotificationMessage::replication_succeeded("a.txt");
        assert_eq!(success.subject, "S3 Replication Success");
        assert_eq!(success.body, "Object 'a.txt' replicated successfully.");

        let failed = NotificationMessage::replication_failed("a.txt", "NoSuchKey");
        assert!(failed.is_failure());
        assert_eq!(failed.body, "Failed to replicate object 'a.txt': NoSuchKey");

        let unexpected = NotificationMessage::unexpected_error(&"boom");
        assert_eq!(unexpected.body, "Unexpected error: boom");
        assert!(!NotificationMessage::replication_completed().is_failure());
    }
}
