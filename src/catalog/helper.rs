//! Multi-step catalog operations built on [`CatalogClient`].

use super::client::CatalogClient;
use super::types::*;
use serde::Serialize;
use subflow_common::Result;

const STORAGE_METHOD: &str = "S3";
const FILE_TYPE: &str = "FILE";
const SUBTITLES_FORMAT: &str = "SUBTITLES";

/// Identifiers created when a file is attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedFile {
    pub file_id: String,
    pub format_id: String,
    pub file_set_id: String,
}

/// Where an asset file lives, relative to its storage and absolutely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLocation {
    /// Storage root joined with the path on storage.
    pub path: String,
    pub path_on_storage: String,
    pub directory_path: String,
    pub file_name: String,
    pub base_name: Option<String>,
    /// Extension including the leading dot.
    pub extension: Option<String>,
}

fn split_path(path_on_storage: &str) -> (&str, &str) {
    match path_on_storage.rfind('/') {
        Some(idx) => (&path_on_storage[..idx], &path_on_storage[idx + 1..]),
        None => ("", path_on_storage),
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Split a file name into stem and extension; dotfiles have no extension.
fn split_extension(file_name: &str) -> (String, Option<String>) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => (
            file_name[..idx].to_string(),
            Some(file_name[idx..].to_string()),
        ),
        _ => (file_name.to_string(), None),
    }
}

/// Locate an asset file on its storage.
pub fn derive_file_location(file: &AssetFile, storages: &[Storage]) -> FileLocation {
    let storage_root = file
        .storage_id
        .as_deref()
        .and_then(|id| storages.iter().find(|s| s.id == id))
        .and_then(|s| s.settings.path.clone())
        .unwrap_or_default();

    let directory_path = file.directory_path.clone().unwrap_or_default();
    let file_name = file.name.clone().unwrap_or_default();
    let path_on_storage = join_path(&directory_path, &file_name);
    let path = join_path(&storage_root, &path_on_storage);

    let (base_name, extension) = if file_name.is_empty() {
        (None, None)
    } else {
        let (stem, ext) = split_extension(&file_name);
        (Some(stem), Some(ext.unwrap_or_default()))
    };

    FileLocation {
        path,
        path_on_storage,
        directory_path,
        file_name,
        base_name,
        extension,
    }
}

impl CatalogClient {
    /// Register a file already present on a storage: format, then file set,
    /// then file.
    pub async fn add_file_to_asset(
        &self,
        asset_id: &str,
        path_on_storage: &str,
        storage_id: &str,
        file_size: u64,
        format_name: &str,
        format_metadata: Vec<FormatMetadata>,
    ) -> Result<AddedFile> {
        let (base_dir, file_name) = split_path(path_on_storage);

        let format = self
            .create_format(
                asset_id,
                &NewFormat {
                    user_id: None,
                    name: format_name.to_string(),
                    metadata: format_metadata,
                    storage_methods: vec![STORAGE_METHOD.to_string()],
                },
            )
            .await?;

        let file_set = self
            .create_file_set(
                asset_id,
                &NewFileSet {
                    format_id: format.id.clone(),
                    storage_id: storage_id.to_string(),
                    base_dir: base_dir.to_string(),
                    name: file_name.to_string(),
                    component_ids: Vec::new(),
                },
            )
            .await?;

        let file = self
            .create_file(
                asset_id,
                &NewFile {
                    original_name: file_name.to_string(),
                    directory_path: base_dir.to_string(),
                    size: file_size,
                    file_type: FILE_TYPE.to_string(),
                    storage_id: storage_id.to_string(),
                    file_set_id: file_set.id.clone(),
                    format_id: format.id.clone(),
                },
            )
            .await?;

        tracing::info!(
            "Added {} to asset {} as file {}",
            path_on_storage,
            asset_id,
            file.id
        );

        Ok(AddedFile {
            file_id: file.id,
            format_id: format.id,
            file_set_id: file_set.id,
        })
    }

    /// Register a subtitle file under a `SUBTITLES` format.
    pub async fn add_subtitle_file_to_asset(
        &self,
        asset_id: &str,
        path_on_storage: &str,
        storage_id: &str,
        language: &str,
        closed_captions: bool,
    ) -> Result<AddedFile> {
        let mut metadata = FormatMetadata::new();
        metadata.insert("subtitle_language".to_string(), language.to_string());
        metadata.insert(
            "subtitle_closed_captions".to_string(),
            closed_captions.to_string(),
        );

        self.add_file_to_asset(
            asset_id,
            path_on_storage,
            storage_id,
            0,
            SUBTITLES_FORMAT,
            vec![metadata],
        )
        .await
    }

    /// Presigned URL for an asset file.
    pub async fn asset_file_url(&self, asset_id: &str, file_id: &str) -> Result<String> {
        self.get_upload_url(asset_id, file_id).await
    }
}
