//! Builds the AWS clients and notifiers once per cold start

use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use replicator_core::config::AwsConfig;
use replicator_core::ReplicatorConfig;
use replicator_notify::{SnsPublisher, TeamsWebhook};
use replicator_storage::S3ObjectStore;
use tracing::{debug, info};

use crate::handler::ReplicationHandler;

/// Load the shared SDK configuration, applying any overrides
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &aws.endpoint_url {
        debug!("Using custom AWS endpoint: {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Wire the production collaborators into a handler
pub async fn build_handler(config: ReplicatorConfig) -> Result<ReplicationHandler> {
    let sdk_config = load_sdk_config(&config.aws).await;

    let store = S3ObjectStore::from_sdk_config(&sdk_config, config.aws.force_path_style);
    let publisher = SnsPublisher::from_sdk_config(&sdk_config, config.topic.arn.clone());
    let webhook = TeamsWebhook::new(config.webhook.url.clone())
        .context("Failed to initialize Teams webhook client")?;

    info!(
        topic_arn = publisher.topic_arn().unwrap_or("<unset>"),
        teams_enabled = config.webhook.enabled,
        teams_url_configured = webhook.url().is_some(),
        "Replication handler initialized"
    );

    Ok(ReplicationHandler::new(
        config,
        Arc::new(store),
        Arc::new(publisher),
        Arc::new(webhook),
    ))
}
