//! Replication handler
//!
//! Copies one object per invocation and reports the outcome:
//!
//! | Path | Topic publishes | Chat posts |
//! |---|---|---|
//! | success | success, then completed | success (if enabled) |
//! | copy failed | failed | failed (if enabled) |
//! | missing key | failed | never |
//! | anything else | failed | never |

use std::sync::Arc;

use replicator_core::types::{
    NotificationMessage, ReplicationRequest, ReplicationResponse, ReplicationTarget,
};
use replicator_core::{Error, ObjectStore, ReplicatorConfig, Result, TopicPublisher, WebhookNotifier};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

#[derive(Clone)]
pub struct ReplicationHandler {
    config: Arc<ReplicatorConfig>,
    store: Arc<dyn ObjectStore>,
    publisher: Arc<dyn TopicPublisher>,
    webhook: Arc<dyn WebhookNotifier>,
}

impl ReplicationHandler {
    pub fn new(
        config: ReplicatorConfig,
        store: Arc<dyn ObjectStore>,
        publisher: Arc<dyn TopicPublisher>,
        webhook: Arc<dyn WebhookNotifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            publisher,
            webhook,
        }
    }

    /// Handle one invocation payload
    pub async fn handle(&self, event: Value) -> Result<ReplicationResponse> {
        info!("Replication handler triggered");

        match self.replicate(&event).await {
            Ok(response) => {
                info!("Replication handler execution completed");
                Ok(response)
            }
            Err(err) => Err(self.report_failure(err).await),
        }
    }

    async fn replicate(&self, event: &Value) -> Result<ReplicationResponse> {
        let target = ReplicationRequest::from_event(event)?.resolve(&self.config.buckets)?;
        self.replicate_target(&target).await
    }

    #[instrument(
        skip(self, target),
        fields(
            key = %target.key,
            source = %target.source_bucket,
            destination = %target.destination_bucket
        )
    )]
    async fn replicate_target(&self, target: &ReplicationTarget) -> Result<ReplicationResponse> {
        self.copy_object(target).await?;

        let success = NotificationMessage::replication_succeeded(&target.key);
        self.publisher.publish(&success).await?;
        if self.config.webhook.enabled {
            self.webhook.notify(&success.body).await?;
        }
        self.publisher
            .publish(&NotificationMessage::replication_completed())
            .await?;

        Ok(ReplicationResponse::success())
    }

    /// Copy the object, reporting a failure on every enabled channel before
    /// returning it. Store errors are opaque and all become [`Error::Copy`].
    ///
    /// The topic hears about a copy failure exactly once: a failing publisher
    /// surfaces as [`Error::Publish`] and skips the chat post, while a failing
    /// chat post is logged and the copy error is still returned.
    #[instrument(skip(self, target))]
    async fn copy_object(&self, target: &ReplicationTarget) -> Result<()> {
        let result = self
            .store
            .copy(
                &target.source_bucket,
                &target.destination_bucket,
                &target.key,
            )
            .await;

        let reason = match result {
            Ok(receipt) => {
                info!(
                    etag = ?receipt.etag,
                    version_id = ?receipt.version_id,
                    "Object '{}' successfully copied from '{}' to '{}'",
                    target.key,
                    target.source_bucket,
                    target.destination_bucket
                );
                return Ok(());
            }
            Err(Error::Copy { reason, .. }) => reason,
            Err(other) => other.to_string(),
        };

        error!(error = %reason, "Failed to copy object '{}'", target.key);

        let message = NotificationMessage::replication_failed(&target.key, &reason);
        self.publisher.publish(&message).await?;
        if self.config.webhook.enabled {
            if let Err(webhook_err) = self.webhook.notify(&message.body).await {
                error!(error = %webhook_err, "Failed to report copy failure to Teams");
            }
        }

        Err(Error::copy(&target.key, reason))
    }

    /// Outer boundary: report errors not already reported, then hand the
    /// error back. A failing publisher replaces the original error.
    async fn report_failure(&self, err: Error) -> Error {
        let message = match &err {
            Error::Copy { .. } | Error::Publish(_) => {
                debug!(kind = err.kind(), "Failure already reported or unreportable");
                return err;
            }
            Error::MissingField(_) => NotificationMessage::failure(err.to_string()),
            _ => NotificationMessage::unexpected_error(&err),
        };

        error!(kind = err.kind(), "{}", message.body);

        match self.publisher.publish(&message).await {
            Ok(()) => err,
            Err(publish_err) => publish_err,
        }
    }
}
