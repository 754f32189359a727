//! Object storage and document access.
//!
//! [`BlobStore`] is the object storage seam; [`DocumentReader`] resolves a
//! configuration document location (`s3://`, `http(s)://` or a local path)
//! to its contents.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use subflow_common::{Error, Result, StorageUri};

/// Timeout for documents fetched over HTTP.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to an object store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read an object. A missing object is `Ok(None)`.
    async fn read(&self, bucket: &str, key: &str) -> Result<Option<Bytes>>;
}

/// In-memory object store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: HashMap<(String, String), Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: &str, key: &str, contents: impl Into<Bytes>) {
        self.objects
            .insert((bucket.to_string(), key.to_string()), contents.into());
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        Ok(self
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned())
    }
}

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    Storage(StorageUri),
    Http(String),
    File(String),
}

impl DocumentLocation {
    pub fn parse(location: &str) -> Result<Self> {
        if location.starts_with("s3://") {
            Ok(Self::Storage(StorageUri::parse(location)?))
        } else if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Self::Http(location.to_string()))
        } else {
            Ok(Self::File(location.to_string()))
        }
    }
}

/// Reads documents from object storage, HTTP or the local filesystem.
pub struct DocumentReader {
    blobs: Arc<dyn BlobStore>,
    http: reqwest::Client,
}

impl DocumentReader {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self { blobs, http }
    }

    /// Read a document. A missing document is `Ok(None)`.
    pub async fn read(&self, location: &str) -> Result<Option<Bytes>> {
        match DocumentLocation::parse(location)? {
            DocumentLocation::Storage(uri) => self.blobs.read(uri.bucket(), uri.key()).await,
            DocumentLocation::Http(url) => self.read_http(&url).await,
            DocumentLocation::File(path) => match tokio::fs::read(&path).await {
                Ok(contents) => Ok(Some(Bytes::from(contents))),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(Error::Io(e)),
            },
        }
    }

    /// Read and decode a JSON document.
    pub async fn read_json<T: DeserializeOwned>(&self, location: &str) -> Result<Option<T>> {
        match self.read(location).await? {
            Some(contents) => Ok(Some(serde_json::from_slice(&contents)?)),
            None => Ok(None),
        }
    }

    async fn read_http(&self, url: &str) -> Result<Option<Bytes>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::collaborator("http", "RequestFailed", e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::collaborator("http", status.as_u16().to_string(), body));
        }

        let contents = response
            .bytes()
            .await
            .map_err(|e| Error::collaborator("http", "ReadFailed", e.to_string()))?;
        Ok(Some(contents))
    }
}
