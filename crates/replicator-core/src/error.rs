//! Error types for the replicator

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Input Errors
    #[error("Missing required key in event: '{0}'")]
    MissingField(String),

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    // Collaborator Errors
    #[error("Failed to copy object '{key}': {reason}")]
    Copy { key: String, reason: String },

    #[error("Failed to send SNS notification: {0}")]
    Publish(String),

    #[error("Failed to send message to Teams: {0}")]
    Webhook(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn copy(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Copy {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Stable error kind reported to the invoking runtime
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingField(_) => "MissingFieldError",
            Error::InvalidEvent(_) => "InvalidEventError",
            Error::Copy { .. } => "CopyError",
            Error::Publish(_) => "PublishError",
            Error::Webhook(_) => "WebhookError",
            Error::Config(_) => "ConfigError",
            Error::Other(_) => "InternalError",
        }
    }
}
