//! Replicator Notify
//!
//! Notification channels used to report replication outcomes:
//! - SNS topic (fans out to email subscribers)
//! - Microsoft Teams incoming webhook

mod sns;
mod webhook;

pub use sns::SnsPublisher;
pub use webhook::{TeamsPayload, TeamsWebhook};
