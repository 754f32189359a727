use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use subflow_jobs::JobOptions;

#[derive(Parser)]
#[command(name = "subflow")]
#[command(author, version, about = "Transcription and translation runs for media files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level when RUST_LOG is unset and --verbose is not given
    #[arg(long, global = true, value_enum, ignore_case = true, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    #[value(alias = "critical")]
    Error,
}

impl LogLevel {
    /// Filter directive for `EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a transcribe-translate run and start it
    Create(CreateArgs),

    /// Describe a previously started run
    Describe {
        /// Run (execution) ARN
        #[arg(long = "execution-arn", alias = "run-id", required = true)]
        execution_arn: String,

        /// Only print the transcript and subtitle file URIs
        #[arg(long)]
        uris_only: bool,
    },

    /// Handle a storage notification from a JSON file ("-" for stdin)
    Event {
        /// Notification document
        #[arg(required = true)]
        event: PathBuf,

        /// Event configuration document (s3://, http(s):// or a path)
        #[arg(long, env = "CONFIG_FILE_URI")]
        config_file_uri: Option<String>,
    },

    /// Attach a run's subtitle files to a catalog asset
    Sync {
        /// Run (execution) ARN
        #[arg(long = "execution-arn", alias = "run-id", required = true)]
        execution_arn: String,

        /// Catalog asset to attach the subtitles to
        #[arg(long, required = true)]
        asset_id: String,

        /// Catalog storage holding the run's output bucket
        #[arg(long, required = true)]
        storage_id: String,

        /// Subtitle language (defaults to the run's transcription language)
        #[arg(long)]
        language: Option<String>,

        /// Mark the subtitles as closed captions
        #[arg(long)]
        closed_captions: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Media file to transcribe (s3://bucket/key)
    #[arg(long)]
    pub media_file_uri: Option<String>,

    /// Let the transcription service detect the spoken language
    #[arg(long)]
    pub auto_identify_source_language: bool,

    /// Require --transcription-job-name instead of deriving one
    #[arg(long)]
    pub no_default_transcription_job_name: bool,

    /// Do not nest outputs under the transcription job name
    #[arg(long)]
    pub no_transcription_job_in_output_key: bool,

    /// State machine to start
    #[arg(long)]
    pub state_machine_arn: Option<String>,

    /// Print the run input instead of starting a run
    #[arg(long)]
    pub dry_run: bool,

    /// Bucket for every output when no location is given
    #[arg(long)]
    pub output_bucket_name: Option<String>,

    /// Location for every output when no stage location is given
    #[arg(long)]
    pub output_s3_uri: Option<String>,

    #[arg(long)]
    pub transcription_job_name: Option<String>,

    /// Folder under the transcription output ("" for none)
    #[arg(long)]
    pub transcription_output_folder_name: Option<String>,

    #[arg(long)]
    pub transcription_output_s3_uri: Option<String>,

    /// Spoken language of the media, e.g. en-US
    #[arg(long)]
    pub transcription_source_language_code: Option<String>,

    /// Subtitle formats, comma separated
    #[arg(long, value_delimiter = ',')]
    pub subtitle_formats: Option<Vec<String>>,

    #[arg(long)]
    pub translation_data_access_role_arn: Option<String>,

    /// Target languages, or "all"
    #[arg(short = 'l', long = "translation-languages", num_args = 1.., value_delimiter = ',')]
    pub translation_language_codes: Option<Vec<String>>,

    /// Folder under the translation output ("" for none)
    #[arg(long)]
    pub translation_output_folder_name: Option<String>,

    #[arg(long)]
    pub translation_output_s3_uri: Option<String>,

    /// Language of the transcript being translated
    #[arg(long)]
    pub translation_source_language_code: Option<String>,
}

impl CreateArgs {
    /// The options given on the command line, as a layer over the config defaults.
    pub fn job_options(&self) -> JobOptions {
        JobOptions {
            media_file_uri: self.media_file_uri.clone(),
            transcription_source_language_code: self.transcription_source_language_code.clone(),
            auto_identify_source_language: self.auto_identify_source_language.then_some(true),
            subtitle_formats: self.subtitle_formats.clone(),
            create_default_transcription_job_name: self
                .no_default_transcription_job_name
                .then_some(false),
            append_transcription_job_to_object_key: self
                .no_transcription_job_in_output_key
                .then_some(false),
            transcription_job_name: self.transcription_job_name.clone(),
            transcription_output_s3_uri: self.transcription_output_s3_uri.clone(),
            transcription_output_folder_name: self.transcription_output_folder_name.clone(),
            translation_source_language_code: self.translation_source_language_code.clone(),
            translation_language_codes: self.translation_language_codes.clone(),
            translation_data_access_role_arn: self.translation_data_access_role_arn.clone(),
            translation_output_s3_uri: self.translation_output_s3_uri.clone(),
            translation_output_folder_name: self.translation_output_folder_name.clone(),
            output_bucket_name: self.output_bucket_name.clone(),
            output_s3_uri: self.output_s3_uri.clone(),
        }
    }
}
