//! Media base names and transcription job names.

use crate::options::{JobOptions, AUTO_LANGUAGE_CODE};
use regex::Regex;
use std::sync::LazyLock;
use subflow_common::{Error, Result};

/// Characters the transcription service accepts in a job name.
static JOB_NAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z._-]").expect("valid job name pattern"));

/// File name of a media URI with its last extension removed.
///
/// Query strings and fragments are ignored. Leading dots belong to the name,
/// so `.hidden` has no extension.
///
/// # Examples
///
/// ```
/// use subflow_jobs::naming::derive_base_name;
///
/// assert_eq!(derive_base_name("s3://b/path/clip.final.mov"), "clip.final");
/// assert_eq!(derive_base_name("s3://b/path/clip.mov?versionId=2"), "clip");
/// assert_eq!(derive_base_name("s3://b/README"), "README");
/// ```
pub fn derive_base_name(media_file_uri: &str) -> String {
    let without_suffix = match media_file_uri.split_once("://") {
        Some((_, rest)) => {
            let cut = rest.find(&['?', '#'][..]).unwrap_or(rest.len());
            &rest[..cut]
        }
        None => media_file_uri,
    };

    let file_name = without_suffix
        .rsplit('/')
        .next()
        .unwrap_or(without_suffix);

    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(idx) => file_name[..leading_dots + idx].to_string(),
        None => file_name.to_string(),
    }
}

/// Replace every character outside `[0-9A-Za-z._-]` with `-`.
///
/// # Examples
///
/// ```
/// use subflow_jobs::naming::sanitize_job_name;
///
/// assert_eq!(sanitize_job_name("clip (final)!"), "clip--final--");
/// ```
pub fn sanitize_job_name(name: &str) -> String {
    JOB_NAME_DISALLOWED.replace_all(name, "-").into_owned()
}

/// The default job name: `{base_name}-{source_language}` (or `-auto`).
pub fn default_job_name(options: &JobOptions, base_name: &str) -> String {
    let language = options
        .transcription_source_language_code()
        .unwrap_or(AUTO_LANGUAGE_CODE);
    format!("{}-{}", base_name, language)
}

/// The sanitized transcription job name.
///
/// Uses the explicit name when given, otherwise builds the default name if
/// auto-naming is enabled.
pub fn determine_job_name(options: &JobOptions) -> Result<String> {
    let name = match options.transcription_job_name() {
        Some(name) => name.to_string(),
        None if options.create_default_transcription_job_name() => {
            let base_name = derive_base_name(options.media_file_uri()?);
            default_job_name(options, &base_name)
        }
        None => return Err(Error::configuration("job name required")),
    };

    Ok(sanitize_job_name(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_for(media: &str) -> JobOptions {
        JobOptions {
            media_file_uri: Some(media.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_name_strips_last_extension_only() {
        assert_eq!(derive_base_name("s3://b/path/clip.final.mov"), "clip.final");
        assert_eq!(derive_base_name("s3://in/video.mp4"), "video");
    }

    #[test]
    fn test_base_name_ignores_query_and_fragment() {
        assert_eq!(derive_base_name("s3://b/a/clip.mov#t=10"), "clip");
        assert_eq!(derive_base_name("s3://b/a/clip.tar.gz?x=1#y"), "clip.tar");
    }

    #[test]
    fn test_base_name_without_extension() {
        assert_eq!(derive_base_name("s3://b/a/clip"), "clip");
        assert_eq!(derive_base_name("s3://b/a/.hidden"), ".hidden");
        assert_eq!(derive_base_name("s3://b/a/.hidden.mp4"), ".hidden");
        assert_eq!(derive_base_name("s3://b/dir/"), "");
    }

    #[test]
    fn test_sanitize_replaces_each_character() {
        assert_eq!(sanitize_job_name("clip (final)!"), "clip--final--");
        assert_eq!(sanitize_job_name("a/b:c"), "a-b-c");
        assert_eq!(sanitize_job_name("ok_name-1.2"), "ok_name-1.2");
        assert_eq!(sanitize_job_name("café"), "caf-");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["clip (final)!", "über/…", "plain", ""] {
            let once = sanitize_job_name(input);
            assert_eq!(sanitize_job_name(&once), once);
        }
    }

    #[test]
    fn test_determine_job_name_default() {
        let options = options_for("s3://in/video.mp4");
        assert_eq!(determine_job_name(&options).unwrap(), "video-auto");

        let options = JobOptions {
            transcription_source_language_code: Some("en-US".to_string()),
            ..options_for("s3://in/my clip.mp4")
        };
        assert_eq!(determine_job_name(&options).unwrap(), "my-clip-en-US");
    }

    #[test]
    fn test_determine_job_name_explicit_is_sanitized() {
        let options = JobOptions {
            transcription_job_name: Some("clip (final)!".to_string()),
            ..options_for("s3://in/video.mp4")
        };
        assert_eq!(determine_job_name(&options).unwrap(), "clip--final--");
    }

    #[test]
    fn test_determine_job_name_required_without_auto_naming() {
        let options = JobOptions {
            create_default_transcription_job_name: Some(false),
            ..options_for("s3://in/video.mp4")
        };
        let err = determine_job_name(&options).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("job name required"));
    }
}
