use super::{sdk_error, AwsContext};
use crate::storage::BlobStore;
use async_trait::async_trait;
use aws_sdk_s3::error::ProvideErrorMetadata;
use bytes::Bytes;
use std::sync::Arc;
use subflow_common::{Error, Result};

/// Object reads through S3 `GetObject`.
pub struct S3BlobStore {
    aws: Arc<AwsContext>,
}

impl S3BlobStore {
    pub fn new(aws: Arc<AwsContext>) -> Self {
        Self { aws }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn read(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        tracing::debug!("Reading s3://{}/{}", bucket, key);
        let client = self.aws.s3().await;

        let output = match client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                    || matches!(err.code(), Some("NoSuchKey") | Some("NotFound"));
                if missing {
                    return Ok(None);
                }
                return Err(sdk_error("s3", err));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| Error::collaborator("s3", "ReadFailed", e.to_string()))?;
        Ok(Some(data.into_bytes()))
    }
}
