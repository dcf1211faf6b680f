//! S3 implementation of [`ObjectStore`]

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use replicator_core::types::CopyReceipt;
use replicator_core::{Error, ObjectStore, Result};
use tracing::{debug, instrument};

/// Characters left as-is in a copy source; everything else is percent-encoded
const COPY_SOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the `x-amz-copy-source` value for `key` in `bucket`
pub fn encode_copy_source(bucket: &str, key: &str) -> String {
    format!(
        "{}/{}",
        bucket,
        utf8_percent_encode(key, COPY_SOURCE_ENCODE_SET)
    )
}

#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    inner: Client,
}

impl S3ObjectStore {
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    /// Create a client from the shared SDK configuration
    pub fn from_sdk_config(sdk_config: &SdkConfig, force_path_style: bool) -> Self {
        let s3_config = S3ConfigBuilder::from(sdk_config)
            .force_path_style(force_path_style)
            .build();

        Self::new(Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self))]
    async fn copy(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> Result<CopyReceipt> {
        let copy_source = encode_copy_source(source_bucket, key);
        debug!(copy_source = %copy_source, "Issuing CopyObject");

        let output = self
            .inner
            .copy_object()
            .bucket(destination_bucket)
            .key(key)
            .copy_source(copy_source)
            .send()
            .await
            .map_err(|e| Error::copy(key, DisplayErrorContext(&e).to_string()))?;

        Ok(CopyReceipt {
            etag: output
                .copy_object_result()
                .and_then(|result| result.e_tag())
                .map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }
}
