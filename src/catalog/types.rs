use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Paged list envelope: `{"objects": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectList<T> {
    #[serde(default = "Vec::new")]
    pub objects: Vec<T>,
}

/// Response of any create call; only the identifier is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: String,
}

/// Free-form metadata entry attached to a format.
pub type FormatMetadata = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize)]
pub struct NewFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub metadata: Vec<FormatMetadata>,
    pub storage_methods: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFileSet {
    pub format_id: String,
    pub storage_id: String,
    pub base_dir: String,
    pub name: String,
    pub component_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFile {
    pub original_name: String,
    pub directory_path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub storage_id: String,
    pub file_set_id: String,
    pub format_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub directory_path: Option<String>,
    #[serde(default)]
    pub storage_id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetFormat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: Vec<serde_json::Value>,
    #[serde(default)]
    pub storage_methods: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetFileSet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub storage_id: Option<String>,
    #[serde(default)]
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: StorageSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// Root path of the storage inside its bucket.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadUrl {
    pub url: String,
}
