//! Collaborator traits
//!
//! The handler talks to the outside world only through these three traits.
//! Implementations exist for S3, SNS and Teams incoming webhooks.

use async_trait::async_trait;

use crate::types::{CopyReceipt, NotificationMessage};
use crate::Result;

/// Object store supporting server-side copies
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copy `key` from `source_bucket` to the same key in `destination_bucket`
    async fn copy(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> Result<CopyReceipt>;
}

/// Pub/sub topic; fan-out to subscribers is owned by the topic
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, message: &NotificationMessage) -> Result<()>;
}

/// Chat webhook
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}
