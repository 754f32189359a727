//! Attach subtitles produced by a run to a catalog asset.

use crate::catalog::{AddedFile, CatalogClient};
use crate::orchestrator::{Orchestrator, RunDescription};
use anyhow::{Context, Result};
use reqwest::Url;
use subflow_common::StorageUri;

#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub run_id: String,
    pub asset_id: String,
    pub storage_id: String,
    /// Overrides the language reported by the run.
    pub language: Option<String>,
    pub closed_captions: bool,
}

/// Object key of a produced file.
///
/// Accepts `s3://bucket/key`, path-style
/// `https://s3.<region>.amazonaws.com/bucket/key` and virtual-hosted
/// `https://bucket.s3.<region>.amazonaws.com/key` locations. Percent-encoded
/// characters are left as they appear in the URL.
pub fn storage_path_from_uri(uri: &str) -> Result<String> {
    if uri.starts_with("s3://") {
        return Ok(StorageUri::parse(uri)?.key().to_string());
    }

    let url = Url::parse(uri).with_context(|| format!("Invalid file URI: {}", uri))?;
    let host = url.host_str().unwrap_or_default();
    let path = url.path().trim_start_matches('/');

    let key = if host.starts_with("s3.") || host.starts_with("s3-") || host == "s3.amazonaws.com" {
        // Path style: the first segment is the bucket.
        path.split_once('/').map(|(_, key)| key).unwrap_or_default()
    } else {
        path
    };

    if key.is_empty() {
        anyhow::bail!("File URI has no object key: {}", uri);
    }
    Ok(key.to_string())
}

/// Strip the storage root from an object key when the key lies beneath it.
fn relative_to_storage_root(key: &str, root: Option<&str>) -> String {
    let root = root.unwrap_or_default().trim_matches('/');
    if root.is_empty() {
        return key.to_string();
    }
    match key.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        _ => key.to_string(),
    }
}

/// Register every subtitle file of a finished run with the catalog asset.
pub async fn sync_subtitles(
    orchestrator: &dyn Orchestrator,
    catalog: &CatalogClient,
    request: &SyncRequest,
) -> Result<Vec<AddedFile>> {
    let raw = orchestrator
        .describe(&request.run_id)
        .await
        .with_context(|| format!("Failed to describe run {}", request.run_id))?;
    let description = RunDescription::decode(raw)?;

    let subtitle_uris = description
        .transcription_uris()
        .transcription
        .subtitle_file_uris
        .unwrap_or_default();
    if subtitle_uris.is_empty() {
        anyhow::bail!(
            "Run {} ({}) has no subtitle files",
            request.run_id,
            description.status
        );
    }

    let language = request
        .language
        .clone()
        .or_else(|| description.transcription_language_code())
        .context("No subtitle language given and the run does not report one")?;

    let storage = catalog
        .get_storage(&request.storage_id)
        .await
        .with_context(|| format!("Failed to fetch storage {}", request.storage_id))?;

    let mut added = Vec::with_capacity(subtitle_uris.len());
    for uri in &subtitle_uris {
        let key = storage_path_from_uri(uri)?;
        let path_on_storage = relative_to_storage_root(&key, storage.settings.path.as_deref());

        let file = catalog
            .add_subtitle_file_to_asset(
                &request.asset_id,
                &path_on_storage,
                &request.storage_id,
                &language,
                request.closed_captions,
            )
            .await
            .with_context(|| format!("Failed to add {} to asset {}", uri, request.asset_id))?;
        added.push(file);
    }

    Ok(added)
}
