//! Workflow orchestrator seam and run descriptions.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use subflow_common::Result;

/// Starts and inspects state machine runs.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Start a run with a JSON input, returning the run identifier.
    async fn start(&self, state_machine_arn: &str, input: &str) -> Result<String>;

    /// Fetch a run as reported by the orchestrator.
    async fn describe(&self, run_id: &str) -> Result<RawRunDescription>;
}

/// A run as returned by the orchestrator; `input` and `output` are JSON text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRunDescription {
    pub run_id: String,
    pub state_machine_arn: String,
    pub name: Option<String>,
    pub status: String,
    pub start_date: Option<String>,
    pub stop_date: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

/// A run with its input and output decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDescription {
    #[serde(rename = "executionArn")]
    pub run_id: String,
    pub state_machine_arn: String,
    pub name: Option<String>,
    pub status: String,
    pub start_date: Option<String>,
    pub stop_date: Option<String>,
    pub input: Option<Value>,
    pub output: Option<Value>,
}

impl RunDescription {
    /// Decode the JSON-encoded input and output.
    pub fn decode(raw: RawRunDescription) -> Result<Self> {
        let input = raw.input.as_deref().map(serde_json::from_str).transpose()?;
        let output = raw.output.as_deref().map(serde_json::from_str).transpose()?;

        Ok(Self {
            run_id: raw.run_id,
            state_machine_arn: raw.state_machine_arn,
            name: raw.name,
            status: raw.status,
            start_date: raw.start_date,
            stop_date: raw.stop_date,
            input,
            output,
        })
    }

    fn transcription_job(&self) -> Option<&Value> {
        self.output.as_ref()?.get("TranscriptionJob")
    }

    /// The transcript and subtitle locations produced by the run.
    pub fn transcription_uris(&self) -> TranscriptionUris {
        let job = self.transcription_job();

        let transcript_file_uri = job
            .and_then(|j| j.pointer("/Transcript/TranscriptFileUri"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let subtitle_file_uris = job
            .and_then(|j| j.pointer("/Subtitles/SubtitleFileUris"))
            .and_then(Value::as_array)
            .map(|uris| {
                uris.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });

        TranscriptionUris {
            transcription: TranscriptionFileUris {
                transcript_file_uri,
                subtitle_file_uris,
            },
        }
    }

    /// Language of the transcription: detected by the job, else requested.
    pub fn transcription_language_code(&self) -> Option<String> {
        let detected = self
            .transcription_job()
            .and_then(|j| j.get("LanguageCode"))
            .and_then(Value::as_str);
        let requested = self
            .input
            .as_ref()
            .and_then(|i| i.pointer("/Transcribe/LanguageCode"))
            .and_then(Value::as_str);

        detected.or(requested).map(str::to_string)
    }
}

/// `{"Transcription": {"TranscriptFileUri": ..., "SubtitleFileUris": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionUris {
    pub transcription: TranscriptionFileUris,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionFileUris {
    pub transcript_file_uri: Option<String>,
    pub subtitle_file_uris: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finished_run() -> RawRunDescription {
        RawRunDescription {
            run_id: "arn:aws:states:us-east-1:1:execution:tt:run-1".to_string(),
            state_machine_arn: "arn:aws:states:us-east-1:1:stateMachine:tt".to_string(),
            status: "SUCCEEDED".to_string(),
            input: Some(json!({"Transcribe": {"LanguageCode": null}}).to_string()),
            output: Some(
                json!({
                    "TranscriptionJob": {
                        "LanguageCode": "en-US",
                        "Transcript": {"TranscriptFileUri": "https://s3.us-east-1.amazonaws.com/out/video.json"},
                        "Subtitles": {"SubtitleFileUris": [
                            "https://s3.us-east-1.amazonaws.com/out/video.srt",
                            "https://s3.us-east-1.amazonaws.com/out/video.vtt"
                        ]}
                    }
                })
                .to_string(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_nested_json() {
        let run = RunDescription::decode(finished_run()).unwrap();
        assert_eq!(run.status, "SUCCEEDED");
        assert!(run.input.unwrap()["Transcribe"].is_object());
        assert!(run.output.unwrap()["TranscriptionJob"].is_object());
    }

    #[test]
    fn test_decode_rejects_bad_json() {
        let raw = RawRunDescription {
            output: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(RunDescription::decode(raw).is_err());
    }

    #[test]
    fn test_transcription_uris() {
        let run = RunDescription::decode(finished_run()).unwrap();
        let uris = serde_json::to_value(run.transcription_uris()).unwrap();
        assert_eq!(
            uris["Transcription"]["TranscriptFileUri"],
            "https://s3.us-east-1.amazonaws.com/out/video.json"
        );
        assert_eq!(
            uris["Transcription"]["SubtitleFileUris"][1],
            "https://s3.us-east-1.amazonaws.com/out/video.vtt"
        );
    }

    #[test]
    fn test_transcription_uris_for_running_run() {
        let raw = RawRunDescription {
            status: "RUNNING".to_string(),
            ..Default::default()
        };
        let run = RunDescription::decode(raw).unwrap();
        let uris = run.transcription_uris();
        assert!(uris.transcription.transcript_file_uri.is_none());
        assert!(uris.transcription.subtitle_file_uris.is_none());
    }

    #[test]
    fn test_transcription_language_code() {
        let run = RunDescription::decode(finished_run()).unwrap();
        assert_eq!(run.transcription_language_code().as_deref(), Some("en-US"));

        let raw = RawRunDescription {
            input: Some(json!({"Transcribe": {"LanguageCode": "fr-FR"}}).to_string()),
            ..Default::default()
        };
        let run = RunDescription::decode(raw).unwrap();
        assert_eq!(run.transcription_language_code().as_deref(), Some("fr-FR"));
    }

    #[test]
    fn test_serialized_names() {
        let run = RunDescription::decode(finished_run()).unwrap();
        let json = serde_json::to_value(&run).unwrap();
        assert!(json["executionArn"].is_string());
        assert!(json["stateMachineArn"].is_string());
        assert_eq!(json["status"], "SUCCEEDED");
    }
}
