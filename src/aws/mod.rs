//! AWS collaborators: S3 objects, Step Functions runs and the Translate
//! language list.
//!
//! The SDK configuration is loaded on first use, so commands that never talk
//! to AWS (dry runs, validation) do not resolve credentials or regions.

mod s3;
mod sfn;
mod translate;

pub use s3::S3BlobStore;
pub use sfn::StepFunctionsOrchestrator;
pub use translate::TranslateLanguageCatalog;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_sfn::error::{DisplayErrorContext, ProvideErrorMetadata};
use subflow_common::Error;
use tokio::sync::OnceCell;

/// Lazily loaded shared SDK configuration.
#[derive(Debug, Default)]
pub struct AwsContext {
    config: OnceCell<SdkConfig>,
}

impl AwsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the default credential and region chain once.
    pub async fn config(&self) -> &SdkConfig {
        self.config
            .get_or_init(|| async {
                tracing::debug!("Loading AWS SDK configuration");
                aws_config::load_defaults(BehaviorVersion::latest()).await
            })
            .await
    }

    pub async fn s3(&self) -> aws_sdk_s3::Client {
        aws_sdk_s3::Client::new(self.config().await)
    }

    pub async fn sfn(&self) -> aws_sdk_sfn::Client {
        aws_sdk_sfn::Client::new(self.config().await)
    }

    pub async fn translate(&self) -> aws_sdk_translate::Client {
        aws_sdk_translate::Client::new(self.config().await)
    }
}

/// Convert an SDK failure into a collaborator error carrying the service code.
pub(crate) fn sdk_error<E>(service: &str, err: E) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    Error::collaborator(service, code, message)
}
