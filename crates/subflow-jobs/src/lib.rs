//! Subflow-Jobs: Transcribe and Translate job input construction.
//!
//! Turns sparse [`JobOptions`] into a [`RunInput`] for the transcribe-translate
//! state machine:
//!
//! - **Options**: layered options, defaults and output location fallback
//! - **Naming**: media base names and sanitized transcription job names
//! - **Transcribe**: the transcription descriptor and its predicted output file
//! - **Translate**: one translation descriptor per target language
//! - **Languages**: `["all"]` expansion through a [`LanguageCatalog`]
//!
//! Nothing in this crate logs or performs I/O apart from the catalog lookup.
//!
//! # Examples
//!
//! ```
//! use subflow_jobs::{build_run_input_for_languages, JobOptions};
//!
//! let options = JobOptions {
//!     media_file_uri: Some("s3://in/video.mp4".into()),
//!     output_bucket_name: Some("out".into()),
//!     ..Default::default()
//! };
//! let run_input = build_run_input_for_languages(&options, &["fr".to_string()]).unwrap();
//! assert_eq!(run_input.transcribe.output_key, "video-auto/transcribed/video.json");
//! assert_eq!(run_input.translate.inputs.len(), 1);
//! ```

pub mod languages;
pub mod naming;
pub mod options;
pub mod run_input;
pub mod transcribe;
pub mod translate;

pub use languages::{expand_language_codes, LanguageCatalog, StaticLanguageCatalog};
pub use naming::{derive_base_name, determine_job_name, sanitize_job_name};
pub use options::{resolve_uri, JobOptions, UriField};
pub use run_input::{build_run_input, build_run_input_for_languages, RunInput};
pub use transcribe::{build_transcribe_descriptor, TranscribeJobDescriptor};
pub use translate::{build_translate_input, TranslateInput, TranslateJobDescriptor};
