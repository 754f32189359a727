//! Storage "object created" notifications.
//!
//! A notification names a bucket and key; the media location is derived from
//! it and layered over the `input` section of an event configuration
//! document, then the run is built and submitted as `create` would.

use crate::commands::{build_and_submit, CreateOutcome, Submission};
use crate::orchestrator::Orchestrator;
use crate::storage::DocumentReader;
use serde::{Deserialize, Serialize};
use subflow_common::{Error, Result, StorageUri};
use subflow_jobs::{JobOptions, LanguageCatalog};

/// Environment variable naming the event configuration document.
pub const CONFIG_FILE_URI_ENV: &str = "CONFIG_FILE_URI";

const SUPPORTED_SOURCE: &str = "aws:s3";
const SUPPORTED_EVENT: &str = "ObjectCreated:Put";

#[derive(Debug, Clone, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_source: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
}

/// The event configuration document: `{"input": {...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventConfig {
    pub input: EventInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventInput {
    #[serde(flatten)]
    pub options: JobOptions,
    pub state_machine_arn: Option<String>,
    pub dry_run: bool,
}

/// Handler result, `{"success": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResponse {
    pub success: bool,
}

/// Everything an event needs beyond the notification itself.
pub struct EventContext<'a> {
    pub documents: &'a DocumentReader,
    pub config_file_uri: Option<String>,
    /// Options beneath the event document (the local config `[defaults]`).
    pub defaults: JobOptions,
    pub state_machine_arn: Option<String>,
    pub catalog: &'a dyn LanguageCatalog,
    pub orchestrator: &'a dyn Orchestrator,
}

impl EventRecord {
    /// `s3://bucket/key` of the created object.
    ///
    /// Keys are used as delivered; URL-encoded characters are not decoded.
    pub fn media_file_uri(&self) -> Result<String> {
        if self.event_source != SUPPORTED_SOURCE {
            return Err(Error::unsupported_event(format!(
                "unsupported event source: {}",
                self.event_source
            )));
        }
        if self.event_name != SUPPORTED_EVENT {
            return Err(Error::unsupported_event(format!(
                "unsupported S3 event: {}",
                self.event_name
            )));
        }
        let s3 = self
            .s3
            .as_ref()
            .ok_or_else(|| Error::unsupported_event("S3 record has no s3 entity"))?;

        Ok(StorageUri::from_parts(&s3.bucket.name, &s3.object.key).to_string())
    }
}

/// Handle the first record of a notification.
pub async fn handle_event(event: &StorageEvent, ctx: &EventContext<'_>) -> Result<EventResponse> {
    let record = event
        .records
        .first()
        .ok_or_else(|| Error::unsupported_event("event has no records"))?;
    let media_file_uri = record.media_file_uri()?;
    tracing::info!("Handling {} for {}", record.event_name, media_file_uri);

    let config_file_uri = ctx
        .config_file_uri
        .as_deref()
        .filter(|uri| !uri.is_empty())
        .ok_or_else(|| {
            Error::configuration(format!("{} environment variable must be set", CONFIG_FILE_URI_ENV))
        })?;

    let config: EventConfig = ctx
        .documents
        .read_json(config_file_uri)
        .await?
        .ok_or_else(|| {
            Error::configuration(format!("error loading config from {}", config_file_uri))
        })?;

    let input = config.input;
    let options = ctx.defaults.clone().layered(input.options).layered(JobOptions {
        media_file_uri: Some(media_file_uri),
        ..Default::default()
    });
    let submission = Submission {
        state_machine_arn: input
            .state_machine_arn
            .or_else(|| ctx.state_machine_arn.clone()),
        dry_run: input.dry_run,
    };

    match build_and_submit(&options, &submission, ctx.catalog, ctx.orchestrator).await? {
        CreateOutcome::DryRun(run_input) => {
            tracing::info!("Dry run, not submitting: {}", run_input.to_json()?);
        }
        CreateOutcome::Started { run_id, .. } => {
            tracing::info!("Event started run {}", run_id);
        }
    }

    Ok(EventResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, name: &str) -> EventRecord {
        serde_json::from_value(serde_json::json!({
            "eventSource": source,
            "eventName": name,
            "s3": {"bucket": {"name": "in"}, "object": {"key": "uploads/video.mp4"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_media_file_uri() {
        let uri = record("aws:s3", "ObjectCreated:Put").media_file_uri().unwrap();
        assert_eq!(uri, "s3://in/uploads/video.mp4");
    }

    #[test]
    fn test_unsupported_records() {
        let err = record("aws:sqs", "ObjectCreated:Put")
            .media_file_uri()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedEvent(_)));

        let err = record("aws:s3", "ObjectCreated:Copy")
            .media_file_uri()
            .unwrap_err();
        assert!(err.to_string().contains("ObjectCreated:Copy"));
    }

    #[test]
    fn test_event_config_flattens_options() {
        let config: EventConfig = serde_json::from_value(serde_json::json!({
            "input": {
                "output_bucket_name": "out",
                "translation_language_codes": ["fr"],
                "state_machine_arn": "arn:sm",
                "dry_run": true
            }
        }))
        .unwrap();

        assert_eq!(config.input.options.output_bucket_name.as_deref(), Some("out"));
        assert_eq!(config.input.state_machine_arn.as_deref(), Some("arn:sm"));
        assert!(config.input.dry_run);
    }
}
