//! Replicator Core Library
//!
//! Configuration, error types, request/notification types and the
//! collaborator traits shared by the S3 replicator crates.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::ReplicatorConfig;
pub use error::{Error, Result};
pub use traits::{ObjectStore, TopicPublisher, WebhookNotifier};

/// Replicator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status returned to the invoking runtime after a successful replication
pub const REPLICATION_SUCCESS_STATUS: &str = "Object replicated successfully";
