//! Sparse job options and their effective values.
//!
//! [`JobOptions`] is a layer: every field is optional so a config-file layer,
//! a CLI layer and an event layer can be stacked with [`JobOptions::layered`].
//! The accessor methods apply the built-in defaults, and [`resolve_uri`] is
//! the single fallback pipeline for every output location.

use serde::{Deserialize, Serialize};
use subflow_common::{Error, Result, StorageUri};

pub const DEFAULT_TRANSCRIPTION_OUTPUT_FOLDER_NAME: &str = "transcribed";
pub const DEFAULT_TRANSLATION_OUTPUT_FOLDER_NAME: &str = "translated";
pub const DEFAULT_SUBTITLE_FORMATS: &[&str] = &["srt", "vtt"];

/// Language code meaning "let the service detect it".
pub const AUTO_LANGUAGE_CODE: &str = "auto";

/// Single-element language list meaning "every language the catalog knows".
pub const ALL_LANGUAGES: &str = "all";

/// User-supplied job options. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JobOptions {
    pub media_file_uri: Option<String>,

    pub transcription_source_language_code: Option<String>,
    pub auto_identify_source_language: Option<bool>,
    pub subtitle_formats: Option<Vec<String>>,
    pub create_default_transcription_job_name: Option<bool>,
    pub append_transcription_job_to_object_key: Option<bool>,
    pub transcription_job_name: Option<String>,
    pub transcription_output_s3_uri: Option<String>,
    /// Empty string disables the folder.
    pub transcription_output_folder_name: Option<String>,

    pub translation_source_language_code: Option<String>,
    pub translation_language_codes: Option<Vec<String>>,
    pub translation_data_access_role_arn: Option<String>,
    pub translation_output_s3_uri: Option<String>,
    /// Empty string disables the folder.
    pub translation_output_folder_name: Option<String>,

    pub output_bucket_name: Option<String>,
    pub output_s3_uri: Option<String>,
}

/// Which stage-specific destination to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriField {
    TranscriptionOutput,
    TranslationOutput,
}

impl UriField {
    pub fn field_name(self) -> &'static str {
        match self {
            UriField::TranscriptionOutput => "transcription_output_s3_uri",
            UriField::TranslationOutput => "translation_output_s3_uri",
        }
    }

    fn value(self, options: &JobOptions) -> Option<&str> {
        let value = match self {
            UriField::TranscriptionOutput => &options.transcription_output_s3_uri,
            UriField::TranslationOutput => &options.translation_output_s3_uri,
        };
        non_empty(value)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl JobOptions {
    /// Stack `upper` on top of `self`: every field set in `upper` wins.
    pub fn layered(self, upper: JobOptions) -> JobOptions {
        JobOptions {
            media_file_uri: upper.media_file_uri.or(self.media_file_uri),
            transcription_source_language_code: upper
                .transcription_source_language_code
                .or(self.transcription_source_language_code),
            auto_identify_source_language: upper
                .auto_identify_source_language
                .or(self.auto_identify_source_language),
            subtitle_formats: upper.subtitle_formats.or(self.subtitle_formats),
            create_default_transcription_job_name: upper
                .create_default_transcription_job_name
                .or(self.create_default_transcription_job_name),
            append_transcription_job_to_object_key: upper
                .append_transcription_job_to_object_key
                .or(self.append_transcription_job_to_object_key),
            transcription_job_name: upper
                .transcription_job_name
                .or(self.transcription_job_name),
            transcription_output_s3_uri: upper
                .transcription_output_s3_uri
                .or(self.transcription_output_s3_uri),
            transcription_output_folder_name: upper
                .transcription_output_folder_name
                .or(self.transcription_output_folder_name),
            translation_source_language_code: upper
                .translation_source_language_code
                .or(self.translation_source_language_code),
            translation_language_codes: upper
                .translation_language_codes
                .or(self.translation_language_codes),
            translation_data_access_role_arn: upper
                .translation_data_access_role_arn
                .or(self.translation_data_access_role_arn),
            translation_output_s3_uri: upper
                .translation_output_s3_uri
                .or(self.translation_output_s3_uri),
            translation_output_folder_name: upper
                .translation_output_folder_name
                .or(self.translation_output_folder_name),
            output_bucket_name: upper.output_bucket_name.or(self.output_bucket_name),
            output_s3_uri: upper.output_s3_uri.or(self.output_s3_uri),
        }
    }

    /// The input media location. Required.
    pub fn media_file_uri(&self) -> Result<&str> {
        non_empty(&self.media_file_uri)
            .ok_or_else(|| Error::configuration("media_file_uri is required"))
    }

    pub fn transcription_source_language_code(&self) -> Option<&str> {
        non_empty(&self.transcription_source_language_code)
    }

    pub fn auto_identify_source_language(&self) -> bool {
        self.auto_identify_source_language.unwrap_or(false)
    }

    /// Requested subtitle formats, duplicates removed in first-seen order.
    pub fn subtitle_formats(&self) -> Vec<String> {
        let requested: Vec<String> = match &self.subtitle_formats {
            Some(formats) => formats.clone(),
            None => DEFAULT_SUBTITLE_FORMATS.iter().map(|f| f.to_string()).collect(),
        };

        let mut formats: Vec<String> = Vec::with_capacity(requested.len());
        for format in requested {
            if !format.is_empty() && !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }

    pub fn create_default_transcription_job_name(&self) -> bool {
        self.create_default_transcription_job_name.unwrap_or(true)
    }

    pub fn append_transcription_job_to_object_key(&self) -> bool {
        self.append_transcription_job_to_object_key.unwrap_or(true)
    }

    pub fn transcription_job_name(&self) -> Option<&str> {
        non_empty(&self.transcription_job_name)
    }

    pub fn transcription_output_folder_name(&self) -> Option<&str> {
        folder_name(
            &self.transcription_output_folder_name,
            DEFAULT_TRANSCRIPTION_OUTPUT_FOLDER_NAME,
        )
    }

    pub fn translation_source_language_code(&self) -> &str {
        non_empty(&self.translation_source_language_code).unwrap_or(AUTO_LANGUAGE_CODE)
    }

    pub fn translation_language_codes(&self) -> &[String] {
        self.translation_language_codes.as_deref().unwrap_or(&[])
    }

    pub fn translation_data_access_role_arn(&self) -> Option<&str> {
        non_empty(&self.translation_data_access_role_arn)
    }

    pub fn translation_output_folder_name(&self) -> Option<&str> {
        folder_name(
            &self.translation_output_folder_name,
            DEFAULT_TRANSLATION_OUTPUT_FOLDER_NAME,
        )
    }
}

impl JobOptions {
    /// Reject folder names that would be read back as a query or fragment.
    pub fn validate_folder_names(&self) -> Result<()> {
        for (field, value) in [
            (
                "transcription_output_folder_name",
                &self.transcription_output_folder_name,
            ),
            (
                "translation_output_folder_name",
                &self.translation_output_folder_name,
            ),
        ] {
            if let Some(name) = value.as_deref().filter(|n| n.contains(&['?', '#'][..])) {
                return Err(Error::configuration(format!(
                    "{} '{}' must not contain '?' or '#'",
                    field, name
                )));
            }
        }
        Ok(())
    }
}

fn folder_name<'a>(value: &'a Option<String>, default: &'static str) -> Option<&'a str> {
    match value.as_deref() {
        None => Some(default),
        Some("") => None,
        Some(name) => Some(name.trim_matches('/')).filter(|n| !n.is_empty()),
    }
}

/// Resolve an output location through the fallback pipeline.
///
/// Order: the stage-specific URI, then the global `output_s3_uri`, then a URI
/// synthesized from `output_bucket_name`. Empty values count as unset.
///
/// # Examples
///
/// ```
/// use subflow_jobs::options::{resolve_uri, JobOptions, UriField};
///
/// let options = JobOptions {
///     output_bucket_name: Some("out".into()),
///     ..Default::default()
/// };
/// assert_eq!(
///     resolve_uri(&options, UriField::TranscriptionOutput).unwrap(),
///     "s3://out"
/// );
/// ```
pub fn resolve_uri(options: &JobOptions, field: UriField) -> Result<String> {
    if let Some(uri) = field.value(options) {
        return Ok(uri.to_string());
    }

    if let Some(uri) = non_empty(&options.output_s3_uri) {
        return Ok(uri.to_string());
    }

    if let Some(bucket) = non_empty(&options.output_bucket_name) {
        return Ok(StorageUri::for_bucket(bucket));
    }

    Err(Error::configuration(format!(
        "no destination location resolvable for {}",
        field.field_name()
    )))
}
