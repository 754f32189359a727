use super::{sdk_error, AwsContext};
use async_trait::async_trait;
use std::sync::Arc;
use subflow_common::Result;
use subflow_jobs::LanguageCatalog;

const PAGE_SIZE: i32 = 500;

/// Language codes supported by Amazon Translate.
pub struct TranslateLanguageCatalog {
    aws: Arc<AwsContext>,
}

impl TranslateLanguageCatalog {
    pub fn new(aws: Arc<AwsContext>) -> Self {
        Self { aws }
    }
}

#[async_trait]
impl LanguageCatalog for TranslateLanguageCatalog {
    async fn list_language_codes(&self) -> Result<Vec<String>> {
        let client = self.aws.translate().await;
        let mut codes = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = client
                .list_languages()
                .max_results(PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| sdk_error("translate", e))?;

            codes.extend(
                output
                    .languages()
                    .iter()
                    .map(|language| language.language_code().to_string()),
            );

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        tracing::debug!("Translate supports {} languages", codes.len());
        Ok(codes)
    }
}
