//! Catalog REST client tests against a mock server.

mod common;

use assert_matches::assert_matches;
use common::{RecordingOrchestrator, RUN_ID};
use serde_json::json;
use subflow::catalog::CatalogClient;
use subflow::commands::{sync_subtitles, SyncRequest};
use subflow::config::CatalogConfig;
use subflow_common::Error;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSET_ID: &str = "asset-1";
const STORAGE_ID: &str = "storage-1";

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&CatalogConfig {
        enabled: true,
        app_id: "app-id".to_string(),
        auth_token: "secret-token".to_string(),
        base_url: format!("{}/API/", server.uri()),
    })
}

async fn mount_subtitle_creation(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/formats/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "format-1"})))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/file_sets/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-set-1"})))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/files/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-1"})))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn requests_carry_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/API/files/v1/storages/"))
        .and(header("App-ID", "app-id"))
        .and(header("Auth-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                {"id": "storage-1", "name": "media", "settings": {"path": "/media"}},
                {"id": "storage-2", "name": "archive"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storages = client_for(&server).list_storages().await.unwrap();
    assert_eq!(storages.len(), 2);
    assert_eq!(storages[0].settings.path.as_deref(), Some("/media"));
    assert!(storages[1].settings.path.is_none());
}

#[tokio::test]
async fn add_subtitle_file_creates_format_file_set_and_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/formats/", ASSET_ID)))
        .and(body_json(json!({
            "name": "SUBTITLES",
            "metadata": [{"subtitle_closed_captions": "false", "subtitle_language": "en-US"}],
            "storage_methods": ["S3"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "format-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/file_sets/", ASSET_ID)))
        .and(body_json(json!({
            "format_id": "format-1",
            "storage_id": STORAGE_ID,
            "base_dir": "subs/pilot",
            "name": "pilot.srt",
            "component_ids": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-set-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/files/", ASSET_ID)))
        .and(body_json(json!({
            "original_name": "pilot.srt",
            "directory_path": "subs/pilot",
            "size": 0,
            "type": "FILE",
            "storage_id": STORAGE_ID,
            "file_set_id": "file-set-1",
            "format_id": "format-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let added = client_for(&server)
        .add_subtitle_file_to_asset(ASSET_ID, "subs/pilot/pilot.srt", STORAGE_ID, "en-US", false)
        .await
        .unwrap();

    assert_eq!(added.file_id, "file-1");
    assert_eq!(added.format_id, "format-1");
    assert_eq!(added.file_set_id, "file-set-1");
}

#[tokio::test]
async fn error_status_becomes_collaborator_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/API/files/v1/storages/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("storage not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_storage("missing").await.unwrap_err();
    assert_matches!(
        err,
        Error::Collaborator { ref service, ref code, ref message }
            if service == "catalog" && code == "404" && message.contains("storage not found")
    );
}

#[tokio::test]
async fn asset_listings_and_upload_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/assets/{}/files/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{"id": "file-1", "name": "pilot.mp4", "directory_path": "shows", "storage_id": STORAGE_ID}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/assets/{}/formats/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{"id": "format-1", "name": "ORIGINAL", "storage_methods": ["S3"]}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/assets/{}/files/file-1/multipart_url/", ASSET_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://upload.example/part"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let files = client.list_asset_files(ASSET_ID).await.unwrap();
    assert_eq!(files[0].directory_path.as_deref(), Some("shows"));

    let formats = client.list_asset_formats(ASSET_ID).await.unwrap();
    assert_eq!(formats[0].name, "ORIGINAL");

    let url = client.asset_file_url(ASSET_ID, "file-1").await.unwrap();
    assert_eq!(url, "https://upload.example/part");
}

#[tokio::test]
async fn sync_registers_each_subtitle_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/storages/{}/", STORAGE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": STORAGE_ID,
            "settings": {"path": "/"}
        })))
        .mount(&server)
        .await;
    mount_subtitle_creation(&server, 2).await;

    let orchestrator = RecordingOrchestrator::with_description(common::finished_run());
    let request = SyncRequest {
        run_id: RUN_ID.to_string(),
        asset_id: ASSET_ID.to_string(),
        storage_id: STORAGE_ID.to_string(),
        language: None,
        closed_captions: false,
    };

    let added = sync_subtitles(&orchestrator, &client_for(&server), &request)
        .await
        .unwrap();
    assert_eq!(added.len(), 2);

    let file_set_bodies: Vec<serde_json::Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().ends_with("/file_sets/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(file_set_bodies[0]["base_dir"], "video-auto/transcribed");
    assert_eq!(file_set_bodies[0]["name"], "video.srt");
    assert_eq!(file_set_bodies[1]["name"], "video.vtt");

    let format_body: serde_json::Value = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .find(|r| r.url.path().ends_with("/formats/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();
    assert_eq!(format_body["metadata"][0]["subtitle_language"], "en-US");
}

#[tokio::test]
async fn sync_fails_for_run_without_subtitles() {
    let server = MockServer::start().await;
    mount_subtitle_creation(&server, 0).await;

    let orchestrator = RecordingOrchestrator::with_description(subflow::orchestrator::RawRunDescription {
        run_id: RUN_ID.to_string(),
        status: "RUNNING".to_string(),
        ..Default::default()
    });
    let request = SyncRequest {
        run_id: RUN_ID.to_string(),
        asset_id: ASSET_ID.to_string(),
        storage_id: STORAGE_ID.to_string(),
        ..Default::default()
    };

    let err = sync_subtitles(&orchestrator, &client_for(&server), &request)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("RUNNING"));
}

#[tokio::test]
async fn format_file_set_and_transcode_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/assets/{}/formats/format-1/", ASSET_ID)))
        .and(header("App-ID", "app-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "format-1",
            "name": "SUBTITLES",
            "metadata": [{"subtitle_language": "en-US"}],
            "storage_methods": ["S3"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/API/files/v1/assets/{}/file_sets/", ASSET_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{
                "id": "file-set-1",
                "name": "video.srt",
                "format_id": "format-1",
                "storage_id": STORAGE_ID,
                "base_dir": "video-auto/transcribed"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/API/files/v1/assets/{}/files/file-1/subtitles/", ASSET_ID)))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"job_id": "job-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let format = client.get_asset_format(ASSET_ID, "format-1").await.unwrap();
    assert_eq!(format.name, "SUBTITLES");
    assert_eq!(format.storage_methods, vec!["S3"]);
    assert_eq!(format.metadata[0]["subtitle_language"], "en-US");

    let file_sets = client.list_asset_file_sets(ASSET_ID).await.unwrap();
    assert_eq!(file_sets.len(), 1);
    assert_eq!(file_sets[0].format_id.as_deref(), Some("format-1"));
    assert_eq!(file_sets[0].base_dir.as_deref(), Some("video-auto/transcribed"));

    let job = client
        .create_subtitle_transcode_job(ASSET_ID, "file-1")
        .await
        .unwrap();
    assert_eq!(job["job_id"], "job-1");
}
