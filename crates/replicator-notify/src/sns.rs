//! SNS implementation of [`TopicPublisher`]

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use replicator_core::types::NotificationMessage;
use replicator_core::{Error, Result, TopicPublisher};
use tracing::{error, info, instrument};

#[derive(Clone, Debug)]
pub struct SnsPublisher {
    inner: aws_sdk_sns::Client,
    topic_arn: Option<String>,
}

impl SnsPublisher {
    pub fn new(inner: aws_sdk_sns::Client, topic_arn: Option<String>) -> Self {
        Self { inner, topic_arn }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, topic_arn: Option<String>) -> Self {
        Self::new(aws_sdk_sns::Client::new(sdk_config), topic_arn)
    }

    pub fn topic_arn(&self) -> Option<&str> {
        self.topic_arn.as_deref()
    }
}

#[async_trait]
impl TopicPublisher for SnsPublisher {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn publish(&self, message: &NotificationMessage) -> Result<()> {
        let Some(topic_arn) = self.topic_arn.as_deref() else {
            error!("Failed to send SNS notification: no topic ARN configured");
            return Err(Error::Publish("SNS_TOPIC_ARN is not configured".to_string()));
        };

        self.inner
            .publish()
            .topic_arn(topic_arn)
            .subject(&message.subject)
            .message(&message.body)
            .send()
            .await
            .map_err(|e| {
                let reason = DisplayErrorContext(&e).to_string();
                error!(error = %reason, "Failed to send SNS notification");
                Error::Publish(reason)
            })?;

        info!("SNS notification sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};

    fn client() -> aws_sdk_sns::Client {
        let config = aws_sdk_sns::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "replicator-tests"))
            .endpoint_url("http://127.0.0.1:1")
            .build();
        aws_sdk_sns::Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_publish_without_topic() {
        let publisher = SnsPublisher::new(client(), None);
        let message = NotificationMessage::replication_completed();

        let err = publisher.publish(&message).await.unwrap_err();
        assert_eq!(err.kind(), "PublishError");
        assert!(err.to_string().contains("SNS_TOPIC_ARN"));
    }

    #[test]
    fn test_topic_arn() {
        let arn = "arn:aws:sns:us-east-1:123456789012:replication";
        let publisher = SnsPublisher::new(client(), Some(arn.to_string()));
        assert_eq!(publisher.topic_arn(), Some(arn));
    }
}
