//! Storage URI parsing and formatting.
//!
//! Locations are written as `s3://bucket/key`. Parsing follows the usual URL
//! split: the authority is the bucket, the path (without its leading slashes,
//! query and fragment) is the object key.

use crate::{Error, Result};
use std::fmt;

/// Scheme used for every synthesized storage location.
pub const STORAGE_SCHEME: &str = "s3";

/// A parsed `scheme://bucket/key` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUri {
    scheme: String,
    bucket: String,
    key: String,
}

impl StorageUri {
    /// Parse a storage URI.
    ///
    /// Fails with [`Error::MalformedUri`] when there is no `scheme://` prefix
    /// or the authority (bucket) is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use subflow_common::StorageUri;
    ///
    /// let uri = StorageUri::parse("s3://out/video-auto/transcribed/video.json").unwrap();
    /// assert_eq!(uri.bucket(), "out");
    /// assert_eq!(uri.key(), "video-auto/transcribed/video.json");
    ///
    /// assert!(StorageUri::parse("s3:///no-bucket").is_err());
    /// ```
    pub fn parse(uri: &str) -> Result<Self> {
        let (scheme, rest) = uri.split_once("://").ok_or_else(|| {
            Error::malformed_uri(
                uri,
                "expected format scheme://bucket_name/object_key",
            )
        })?;

        if scheme.is_empty() {
            return Err(Error::malformed_uri(uri, "missing scheme"));
        }

        let authority_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
        let bucket = &rest[..authority_end];
        if bucket.is_empty() {
            return Err(Error::malformed_uri(
                uri,
                "missing bucket name (no authority component)",
            ));
        }

        let remainder = &rest[authority_end..];
        let path_end = remainder.find(&['?', '#'][..]).unwrap_or(remainder.len());
        let key = remainder[..path_end].trim_start_matches('/');

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Build the root location of a bucket, e.g. `s3://out`.
    pub fn for_bucket(bucket: &str) -> String {
        format!("{}://{}", STORAGE_SCHEME, bucket)
    }

    /// Build a location from a bucket and key.
    pub fn from_parts(bucket: &str, key: &str) -> Self {
        Self {
            scheme: STORAGE_SCHEME.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Split into `(bucket, key)`.
    pub fn into_parts(self) -> (String, String) {
        (self.bucket, self.key)
    }
}

impl fmt::Display for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}://{}", self.scheme, self.bucket)
        } else {
            write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
        }
    }
}

/// Append a `/` unless the location already ends with one.
pub fn ensure_trailing_separator(mut uri: String) -> String {
    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri
}

/// The directory containing the file a location points at, with a trailing `/`.
///
/// # Examples
///
/// ```
/// use subflow_common::uri::parent_directory;
///
/// assert_eq!(
///     parent_directory("s3://out/video-auto/transcribed/video.json"),
///     "s3://out/video-auto/transcribed/"
/// );
/// ```
pub fn parent_directory(uri: &str) -> String {
    match uri.rfind('/') {
        Some(idx) => uri[..=idx].to_string(),
        None => ensure_trailing_separator(uri.to_string()),
    }
}

/// Whether the location carries a query string or fragment.
pub fn has_query_or_fragment(uri: &str) -> bool {
    let after_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    after_scheme.contains(&['?', '#'][..])
}
