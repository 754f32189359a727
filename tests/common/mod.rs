//! Shared fakes for integration tests.
//!
//! [`RecordingOrchestrator`] captures every started run and answers
//! `describe` with a canned [`RawRunDescription`].

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use subflow::orchestrator::{Orchestrator, RawRunDescription};
use subflow_common::{Error, Result};

pub const STATE_MACHINE_ARN: &str = "arn:aws:states:us-east-1:123456789012:stateMachine:tt";
pub const RUN_ID: &str = "arn:aws:states:us-east-1:123456789012:execution:tt:run-1";

#[derive(Default)]
pub struct RecordingOrchestrator {
    pub started: Mutex<Vec<(String, String)>>,
    pub description: Option<RawRunDescription>,
}

impl RecordingOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(description: RawRunDescription) -> Self {
        Self {
            started: Mutex::new(Vec::new()),
            description: Some(description),
        }
    }

    /// Inputs of started runs, decoded.
    pub fn started_inputs(&self) -> Vec<serde_json::Value> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .map(|(_, input)| serde_json::from_str(input).unwrap())
            .collect()
    }
}

#[async_trait]
impl Orchestrator for RecordingOrchestrator {
    async fn start(&self, state_machine_arn: &str, input: &str) -> Result<String> {
        self.started
            .lock()
            .unwrap()
            .push((state_machine_arn.to_string(), input.to_string()));
        Ok(RUN_ID.to_string())
    }

    async fn describe(&self, run_id: &str) -> Result<RawRunDescription> {
        self.description.clone().ok_or_else(|| {
            Error::collaborator(
                "stepfunctions",
                "ExecutionDoesNotExist",
                format!("Execution does not exist: '{}'", run_id),
            )
        })
    }
}

/// A finished run that produced a transcript and two subtitle files.
pub fn finished_run() -> RawRunDescription {
    let output = serde_json::json!({
        "TranscriptionJob": {
            "TranscriptionJobName": "video-auto",
            "TranscriptionJobStatus": "COMPLETED",
            "LanguageCode": "en-US",
            "Transcript": {
                "TranscriptFileUri": "https://s3.us-east-1.amazonaws.com/out/video-auto/transcribed/video.json"
            },
            "Subtitles": {
                "Formats": ["srt", "vtt"],
                "SubtitleFileUris": [
                    "https://s3.us-east-1.amazonaws.com/out/video-auto/transcribed/video.srt",
                    "https://s3.us-east-1.amazonaws.com/out/video-auto/transcribed/video.vtt"
                ]
            }
        }
    });

    RawRunDescription {
        run_id: RUN_ID.to_string(),
        state_machine_arn: STATE_MACHINE_ARN.to_string(),
        name: Some("run-1".to_string()),
        status: "SUCCEEDED".to_string(),
        start_date: Some("2024-05-01T10:00:00Z".to_string()),
        stop_date: Some("2024-05-01T10:04:12Z".to_string()),
        input: Some(r#"{"Transcribe":{"LanguageCode":null}}"#.to_string()),
        output: Some(output.to_string()),
    }
}
