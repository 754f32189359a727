//! Translation job descriptors.
//!
//! Every target language gets its own descriptor. All of them read the
//! directory the transcription job writes its subtitle files into and write
//! to the same translation destination.

use crate::options::{resolve_uri, JobOptions, UriField};
use crate::transcribe::{transcription_output_root_uri, validate_destination};
use serde::{Deserialize, Serialize};
use subflow_common::uri::parent_directory;
use subflow_common::{ensure_trailing_separator, Result};
use uuid::Uuid;

const JSON_EXTENSION: &str = ".json";

/// Content type of the subtitle files handed to translation.
pub const SOURCE_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDataConfig {
    pub content_type: String,
    pub s3_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDataConfig {
    pub s3_uri: String,
}

/// Input of one batch translation job, in the service's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranslateJobDescriptor {
    pub client_token: String,
    pub data_access_role_arn: Option<String>,
    pub input_data_config: InputDataConfig,
    pub output_data_config: OutputDataConfig,
    pub source_language_code: String,
    pub target_language_codes: Vec<String>,
}

impl TranslateJobDescriptor {
    /// Descriptor for a single target language with a fresh client token.
    pub fn for_language(
        source_directory: &str,
        source_language_code: &str,
        target_language_code: &str,
        data_access_role_arn: Option<&str>,
        output_uri: &str,
    ) -> Self {
        Self {
            client_token: Uuid::new_v4().to_string(),
            data_access_role_arn: data_access_role_arn.map(str::to_string),
            input_data_config: InputDataConfig {
                content_type: SOURCE_CONTENT_TYPE.to_string(),
                s3_uri: source_directory.to_string(),
            },
            output_data_config: OutputDataConfig {
                s3_uri: output_uri.to_string(),
            },
            source_language_code: source_language_code.to_string(),
            target_language_codes: vec![target_language_code.to_string()],
        }
    }
}

/// The translation stage's input: one descriptor per target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranslateInput {
    pub inputs: Vec<TranslateJobDescriptor>,
}

/// Where translated files are written.
///
/// A translation destination that the transcription output starts with is
/// replaced by the transcription root so translations do not land inside the
/// transcription job's folder.
pub fn translation_output_uri(options: &JobOptions, transcription_output_uri: &str) -> Result<String> {
    options.validate_folder_names()?;
    let mut uri = resolve_uri(options, UriField::TranslationOutput)?;
    validate_destination(&uri)?;
    if uri.ends_with(JSON_EXTENSION) {
        uri = parent_directory(&uri);
    }

    if transcription_output_uri.starts_with(&uri) {
        uri = transcription_output_root_uri(options)?;
    }

    let mut uri = ensure_trailing_separator(uri);
    if let Some(folder) = options.translation_output_folder_name() {
        uri.push_str(folder);
        uri.push('/');
    }
    Ok(uri)
}

/// The directory holding the transcription output file.
pub fn translation_source_directory(transcription_output_uri: &str) -> String {
    parent_directory(transcription_output_uri)
}

/// Build the translation input for already-expanded target languages.
///
/// An empty language list yields an empty `Inputs` list.
pub fn build_translate_input(
    options: &JobOptions,
    transcription_output_uri: &str,
    target_language_codes: &[String],
) -> Result<TranslateInput> {
    let output_uri = translation_output_uri(options, transcription_output_uri)?;
    let source_directory = translation_source_directory(transcription_output_uri);
    let source_language_code = options.translation_source_language_code();
    let role_arn = options.translation_data_access_role_arn();

    let inputs = target_language_codes
        .iter()
        .map(|language| {
            TranslateJobDescriptor::for_language(
                &source_directory,
                source_language_code,
                language,
                role_arn,
                &output_uri,
            )
        })
        .collect();

    Ok(TranslateInput { inputs })
}
