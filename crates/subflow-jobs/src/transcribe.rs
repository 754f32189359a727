//! Transcription job descriptor and output location prediction.
//!
//! The translation stage reads the transcription output before the
//! transcription job has run, so the output location has to be computed here
//! exactly the way the transcription service computes it:
//!
//! - an `OutputKey` ending in `.json` names the output file verbatim;
//! - any other key is a directory, and the service writes
//!   `{key}/{job_name}.json` into it.
//!
//! [`transcription_output_file_uri`] always produces a `.json` key, so the
//! requested location and the service's location coincide.

use crate::naming::{derive_base_name, determine_job_name};
use crate::options::{resolve_uri, JobOptions, UriField};
use serde::{Deserialize, Serialize};
use subflow_common::uri::{has_query_or_fragment, parent_directory};
use subflow_common::{ensure_trailing_separator, Error, Result, StorageUri};

/// Subtitle numbering starts at 1.
pub const SUBTITLE_OUTPUT_START_INDEX: u32 = 1;

const OUTPUT_FILE_EXTENSION: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Media {
    pub media_file_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubtitleSettings {
    pub formats: Vec<String>,
    pub output_start_index: u32,
}

/// Input of a transcription job, in the service's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscribeJobDescriptor {
    pub media: Media,
    pub identify_language: bool,
    pub language_code: Option<String>,
    pub output_bucket_name: String,
    pub output_key: String,
    pub transcription_job_name: String,
    pub subtitles: SubtitleSettings,
}

impl TranscribeJobDescriptor {
    /// Where the service will write the transcript for this descriptor.
    pub fn predicted_output_uri(&self) -> String {
        predict_service_output_uri(
            &self.output_bucket_name,
            &self.output_key,
            Some(&self.transcription_job_name),
        )
    }
}

/// Output location rule of the transcription service.
///
/// # Examples
///
/// ```
/// use subflow_jobs::transcribe::predict_service_output_uri;
///
/// assert_eq!(
///     predict_service_output_uri("out", "a/b/video.json", Some("job")),
///     "s3://out/a/b/video.json"
/// );
/// assert_eq!(
///     predict_service_output_uri("out", "a/b/", Some("job")),
///     "s3://out/a/b/job.json"
/// );
/// ```
pub fn predict_service_output_uri(bucket: &str, key: &str, job_name: Option<&str>) -> String {
    let mut uri = ensure_trailing_separator(StorageUri::for_bucket(bucket));
    uri.push_str(key);

    if key.ends_with(OUTPUT_FILE_EXTENSION) {
        return uri;
    }

    if let Some(job_name) = job_name {
        uri = ensure_trailing_separator(uri);
        uri.push_str(job_name);
    }
    uri.push_str(OUTPUT_FILE_EXTENSION);
    uri
}

/// The resolved transcription destination, checked for usability.
fn transcription_destination(options: &JobOptions) -> Result<String> {
    let destination = resolve_uri(options, UriField::TranscriptionOutput)?;
    validate_destination(&destination)?;
    Ok(destination)
}

/// Reject destinations the output rules cannot be applied to.
pub(crate) fn validate_destination(destination: &str) -> Result<()> {
    StorageUri::parse(destination)?;
    if has_query_or_fragment(destination) {
        return Err(Error::malformed_uri(
            destination,
            "output locations must not carry a query string or fragment",
        ));
    }
    Ok(())
}

fn names_output_file(destination: &str) -> bool {
    destination.ends_with(OUTPUT_FILE_EXTENSION)
}

/// The transcription destination as a directory, without job name or folder.
///
/// A destination naming a `.json` file has its parent directory as root.
pub fn transcription_output_root_uri(options: &JobOptions) -> Result<String> {
    let destination = transcription_destination(options)?;
    if names_output_file(&destination) {
        return Ok(parent_directory(&destination));
    }
    Ok(ensure_trailing_separator(destination))
}

/// The transcription destination directory including the job-name segment.
pub fn transcription_output_base_uri(options: &JobOptions, job_name: &str) -> Result<String> {
    let mut uri = transcription_output_root_uri(options)?;
    if options.append_transcription_job_to_object_key() {
        uri.push_str(job_name);
        uri.push('/');
    }
    Ok(uri)
}

/// The full location of the transcript file to request.
///
/// A destination already naming a `.json` file is used as is.
pub fn transcription_output_file_uri(
    options: &JobOptions,
    job_name: &str,
    base_name: &str,
) -> Result<String> {
    let destination = transcription_destination(options)?;
    if names_output_file(&destination) {
        return Ok(destination);
    }

    let mut uri = transcription_output_base_uri(options, job_name)?;
    if let Some(folder) = options.transcription_output_folder_name() {
        uri.push_str(folder);
        uri.push('/');
    }
    uri.push_str(base_name);
    uri.push_str(OUTPUT_FILE_EXTENSION);
    Ok(uri)
}

/// Build the transcription descriptor for a set of options.
pub fn build_transcribe_descriptor(options: &JobOptions) -> Result<TranscribeJobDescriptor> {
    let media_file_uri = options.media_file_uri()?;
    StorageUri::parse(media_file_uri)?;
    options.validate_folder_names()?;

    let base_name = derive_base_name(media_file_uri);
    if base_name.is_empty() {
        return Err(Error::configuration(format!(
            "media_file_uri '{}' does not name a file",
            media_file_uri
        )));
    }

    let job_name = determine_job_name(options)?;
    let output_uri = transcription_output_file_uri(options, &job_name, &base_name)?;
    let (output_bucket_name, output_key) = StorageUri::parse(&output_uri)?.into_parts();

    let language_code = if options.auto_identify_source_language() {
        None
    } else {
        options.transcription_source_language_code().map(str::to_string)
    };

    Ok(TranscribeJobDescriptor {
        media: Media {
            media_file_uri: media_file_uri.to_string(),
        },
        identify_language: language_code.is_none(),
        language_code,
        output_bucket_name,
        output_key,
        transcription_job_name: job_name,
        subtitles: SubtitleSettings {
            formats: options.subtitle_formats(),
            output_start_index: SUBTITLE_OUTPUT_START_INDEX,
        },
    })
}
