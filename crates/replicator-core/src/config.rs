//! Configuration for the replicator
//!
//! Configuration is read once at startup, from an optional TOML file and
//! then from the environment, and is never mutated afterwards.
//!
//! Example config:
//! ```toml
//! [buckets]
//! source = "incoming-objects"
//! destination = "replicated-objects"
//!
//! [topic]
//! arn = "arn:aws:sns:us-east-1:123456789012:replication"
//!
//! [webhook]
//! url = "https://example.webhook.office.com/webhookb2/..."
//! enabled = true
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicatorConfig {
    #[serde(default)]
    pub buckets: BucketConfig,

    #[serde(default)]
    pub topic: TopicConfig,

    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplicatorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Load the optional config file, then let the environment override it
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => {
                Ok(Self::from_file(path)?.with_env_overrides(|name| std::env::var(name).ok()))
            }
            None => Ok(Self::from_env()),
        }
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bucket) = lookup("SOURCE_BUCKET") {
            self.buckets.source = Some(bucket);
        }
        if let Some(bucket) = lookup("DESTINATION_BUCKET") {
            self.buckets.destination = Some(bucket);
        }
        if let Some(arn) = lookup("SNS_TOPIC_ARN") {
            self.topic.arn = Some(arn);
        }
        if let Some(url) = lookup("MS_TEAMS_WEBHOOK_URL") {
            self.webhook.url = Some(url);
        }
        if let Some(enabled) = lookup("MS_TEAMS_ENABLED") {
            self.webhook.enabled = enabled.eq_ignore_ascii_case("true");
        }

        if let Some(region) = lookup("AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Some(endpoint) = lookup("AWS_ENDPOINT_URL") {
            self.aws.endpoint_url = Some(endpoint);
        }
        if let Some(path_style) = lookup("REPLICATOR_FORCE_PATH_STYLE") {
            self.aws.force_path_style = path_style.eq_ignore_ascii_case("true");
        }

        if let Some(level) = lookup("REPLICATOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REPLICATOR_LOG_FORMAT")
            .and_then(|f| f.parse::<LogFormat>().ok())
        {
            self.logging.format = format;
        }

        self
    }

    /// Settings that are allowed at startup but will fail at call time
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.buckets.source.is_none() {
            warnings.push("SOURCE_BUCKET is not set; requests must name a source bucket".into());
        }
        if self.buckets.destination.is_none() {
            warnings.push(
                "DESTINATION_BUCKET is not set; requests must name a destination bucket".into(),
            );
        }
        if self.topic.arn.is_none() {
            warnings.push("SNS_TOPIC_ARN is not set; every notification will fail".into());
        }
        if self.webhook.enabled && self.webhook.url.is_none() {
            warnings.push(
                "MS_TEAMS_ENABLED is true but MS_TEAMS_WEBHOOK_URL is not set".into(),
            );
        }

        warnings
    }
}

/// Default buckets used when a request does not name its own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// Notification topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub arn: Option<String>,
}

/// Chat webhook (Microsoft Teams incoming webhook)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// AWS client overrides; unset values fall back to the SDK default chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsConfig {
    pub region: Option<String>,
    /// Endpoint for S3/SNS compatible services (e.g. LocalStack)
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (CloudWatch friendly)
    #[default]
    Json,
    /// Human readable output for local runs
    Pretty,
}

impl FromStr for LogFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(crate::Error::Config(format!("Unknown log format: {}", other))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}
