//! Replication request types
//!
//! A request arrives as a free-form JSON event:
//!
//! ```json
//! { "key": "path/to/object", "source_bucket": "optional", "destination_bucket": "optional" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BucketConfig;
use crate::{Error, Result, REPLICATION_SUCCESS_STATUS};

/// Name of the required event field
pub const KEY_FIELD: &str = "key";

/// Incoming replication event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub source_bucket: Option<String>,
    #[serde(default)]
    pub destination_bucket: Option<String>,
}

impl ReplicationRequest {
    /// Parse a raw invocation payload. Unknown fields are ignored.
    pub fn from_event(event: &Value) -> Result<Self> {
        Self::deserialize(event).map_err(|e| Error::InvalidEvent(e.to_string()))
    }

    /// Apply configured defaults for any bucket the request does not name.
    ///
    /// Bucket names are not validated; an unset default resolves to an empty
    /// name and is left for the object store to reject.
    pub fn resolve(self, defaults: &BucketConfig) -> Result<ReplicationTarget> {
        let key = self
            .key
            .ok_or_else(|| Error::MissingField(KEY_FIELD.to_string()))?;

        let source_bucket = self
            .source_bucket
            .or_else(|| defaults.source.clone())
            .unwrap_or_default();
        let destination_bucket = self
            .destination_bucket
            .or_else(|| defaults.destination.clone())
            .unwrap_or_default();

        Ok(ReplicationTarget {
            source_bucket,
            destination_bucket,
            key,
        })
    }
}

/// Fully resolved copy target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationTarget {
    pub source_bucket: String,
    pub destination_bucket: String,
    pub key: String,
}

/// Result of a successful server-side copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReceipt {
    pub etag: Option<String>,
    pub version_id: Option<String>,
}

/// Payload returned to the invoking runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationResponse {
    pub status: String,
}

impl ReplicationResponse {
    pub fn success() -> Self {
        Self {
            status: REPLICATION_SUCCESS_STATUS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> BucketConfig {
        BucketConfig {
            source: Some("default-src".to_string()),
            destination: Some("default-dst".to_string()),
        }
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let request = ReplicationRequest::from_event(&json!({"key": "a.txt"})).unwrap();
        let target = request.resolve(&defaults()).unwrap();

        assert_eq!(target.source_bucket, "default-src");
        assert_eq!(target.destination_bucket, "default-dst");
        assert_eq!(target.key, "a.txt");
    }

    #[test]
    fn test_resolve_request_overrides() {
        let request = ReplicationRequest::from_event(&json!({
            "key": "a.txt",
            "source_bucket": "src",
            "destination_bucket": "dst",
            "extra": 42
        }))
        .unwrap();
        let target = request.resolve(&defaults()).unwrap();

        assert_eq!(target.source_bucket, "src");
        assert_eq!(target.destination_bucket, "dst");
    }

    #[test]
    fn test_missing_key() {
        for event in [json!({}), json!({"key": null, "source_bucket": "src"})] {
            let request = ReplicationRequest::from_event(&event).unwrap();
            let err = request.resolve(&defaults()).unwrap_err();
            assert!(matches!(err, Error::MissingField(ref f) if f == "key"));
        }
    }

    #[test]
    fn test_null_buckets_use_defaults() {
        let request = ReplicationRequest::from_event(&json!({
            "key": "a.txt",
            "source_bucket": null,
            "destination_bucket": null
        }))
        .unwrap();
        let target = request.resolve(&defaults()).unwrap();

        assert_eq!(target.source_bucket, "default-src");
        assert_eq!(target.destination_bucket, "default-dst");
    }

    #[test]
    fn test_unset_defaults_resolve_empty() {
        let request = ReplicationRequest::from_event(&json!({"key": "a.txt"})).unwrap();
        let target = request.resolve(&BucketConfig::default()).unwrap();

        assert_eq!(target.source_bucket, "");
        assert_eq!(target.destination_bucket, "");
    }

    #[test]
    fn test_invalid_event() {
        for event in [json!("a.txt"), json!([1, 2]), json!({"key": 7})] {
            let err = ReplicationRequest::from_event(&event).unwrap_err();
            assert_eq!(err.kind(), "InvalidEventError");
        }
    }

    #[test]
    fn test_success_response_shape() {
        let value = serde_json::to_value(ReplicationResponse::success()).unwrap();
        assert_eq!(value, json!({"status": "Object replicated successfully"}));
    }
}
