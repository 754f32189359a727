use super::types::*;
use crate::config::CatalogConfig;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use subflow_common::{Error, Result};

/// Timeout for catalog API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SERVICE: &str = "catalog";

/// iconik files API client authenticated with `App-ID` and `Auth-Token`.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    app_id: String,
    auth_token: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/files/v1{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("App-ID", &self.app_id)
            .header("Auth-Token", &self.auth_token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| Error::collaborator(SERVICE, "RequestFailed", format!("{}: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::collaborator(
                SERVICE,
                status.as_u16().to_string(),
                format!("{}: {}", path, body),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::collaborator(SERVICE, "InvalidResponse", format!("{}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        self.send(self.client.get(self.url(path)), path).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body), path)
            .await
    }

    pub async fn create_format(&self, asset_id: &str, format: &NewFormat) -> Result<Created> {
        self.post(&format!("/assets/{}/formats/", asset_id), format)
            .await
    }

    pub async fn create_file_set(&self, asset_id: &str, file_set: &NewFileSet) -> Result<Created> {
        self.post(&format!("/assets/{}/file_sets/", asset_id), file_set)
            .await
    }

    pub async fn create_file(&self, asset_id: &str, file: &NewFile) -> Result<Created> {
        self.post(&format!("/assets/{}/files/", asset_id), file)
            .await
    }

    /// Ask the catalog to transcode a subtitle file into its internal format.
    pub async fn create_subtitle_transcode_job(
        &self,
        asset_id: &str,
        file_id: &str,
    ) -> Result<serde_json::Value> {
        self.post(
            &format!("/assets/{}/files/{}/subtitles/", asset_id, file_id),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn list_asset_files(&self, asset_id: &str) -> Result<Vec<AssetFile>> {
        let list: ObjectList<AssetFile> =
            self.get(&format!("/assets/{}/files/", asset_id)).await?;
        Ok(list.objects)
    }

    pub async fn list_asset_formats(&self, asset_id: &str) -> Result<Vec<AssetFormat>> {
        let list: ObjectList<AssetFormat> =
            self.get(&format!("/assets/{}/formats/", asset_id)).await?;
        Ok(list.objects)
    }

    pub async fn get_asset_format(&self, asset_id: &str, format_id: &str) -> Result<AssetFormat> {
        self.get(&format!("/assets/{}/formats/{}/", asset_id, format_id))
            .await
    }

    pub async fn list_asset_file_sets(&self, asset_id: &str) -> Result<Vec<AssetFileSet>> {
        let list: ObjectList<AssetFileSet> =
            self.get(&format!("/assets/{}/file_sets/", asset_id)).await?;
        Ok(list.objects)
    }

    pub async fn get_storage(&self, storage_id: &str) -> Result<Storage> {
        self.get(&format!("/storages/{}/", storage_id)).await
    }

    pub async fn list_storages(&self) -> Result<Vec<Storage>> {
        let list: ObjectList<Storage> = self.get("/storages/").await?;
        Ok(list.objects)
    }

    /// Presigned multipart upload URL for a file.
    pub async fn get_upload_url(&self, asset_id: &str, file_id: &str) -> Result<String> {
        let upload: UploadUrl = self
            .get(&format!("/assets/{}/files/{}/multipart_url/", asset_id, file_id))
            .await?;
        Ok(upload.url)
    }
}
