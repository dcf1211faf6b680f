//! Microsoft Teams incoming webhook implementation of [`WebhookNotifier`]

use async_trait::async_trait;
use replicator_core::{Error, Result, WebhookNotifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Wire format: `{"text": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsPayload {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct TeamsWebhook {
    http_client: Client,
    url: Option<String>,
}

impl TeamsWebhook {
    /// Create a notifier. No timeout is imposed beyond the HTTP client defaults.
    pub fn new(url: Option<String>) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| Error::Webhook(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[async_trait]
impl WebhookNotifier for TeamsWebhook {
    #[instrument(skip(self, message))]
    async fn notify(&self, message: &str) -> Result<()> {
        info!("Microsoft Teams reporting is enabled");

        let Some(url) = self.url.as_deref() else {
            error!("Failed to send message to Teams: no webhook URL configured");
            return Err(Error::Webhook(
                "MS_TEAMS_WEBHOOK_URL is not configured".to_string(),
            ));
        };

        let payload = TeamsPayload {
            text: message.to_string(),
        };
        let json = serde_json::to_string(&payload)
            .map_err(|e| Error::Webhook(format!("Failed to serialize message: {}", e)))?;

        let response = self
            .http_client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send message to Teams");
                Error::Webhook(format!("HTTP request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Failed to send message to Teams");
            return Err(Error::Webhook(format!(
                "Webhook returned error status: {}",
                status
            )));
        }

        info!(
            status = status.as_u16(),
            "Message sent to Teams successfully"
        );
        Ok(())
    }
}
